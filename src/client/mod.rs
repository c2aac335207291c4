//! Browser-side submission flow: validate, POST to the gateway, report the outcome.

pub mod notifier;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;

use crate::submission::{FormKind, fields};

pub use notifier::{Notifier, TracingNotifier};

pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";
pub const INTERRUPTED_ERROR: &str = "Submission was interrupted. Please try again.";
const LOADING_MESSAGE: &str = "Submitting...";

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

/// Posts one form at a time to the gateway.
///
/// There is no retry. Dropping a pending `submit` future (a timeout, a
/// torn-down view) marks the submission failed and frees the guard.
pub struct FormSubmitter {
    client: reqwest::Client,
    base_url: String,
    notifier: Arc<dyn Notifier>,
    in_flight: AtomicBool,
    state: Mutex<SubmissionState>,
}

impl FormSubmitter {
    pub fn new(client: reqwest::Client, base_url: &str, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            notifier,
            in_flight: AtomicBool::new(false),
            state: Mutex::new(SubmissionState::Idle),
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn set_state(&self, next: SubmissionState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = next;
    }

    /// Returns `true` when the gateway accepted the submission.
    pub async fn submit(&self, kind: FormKind, payload: &Value) -> bool {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            tracing::debug!("Ignoring {} submission while one is in flight", kind.slug());
            return false;
        }

        let id = kind.toast_id();
        let mut guard = InFlightGuard {
            submitter: self,
            toast_id: id,
            settled: false,
        };

        if let Err(message) = fields::validate(payload, kind.fields()) {
            self.notifier.error(id, &message);
            self.set_state(SubmissionState::Failed(message));
            guard.settled = true;
            return false;
        }

        self.set_state(SubmissionState::Submitting);
        self.notifier.loading(id, LOADING_MESSAGE);

        let outcome = self.post(kind, payload).await;

        match &outcome {
            Ok(message) => {
                self.notifier.success(id, message);
                self.set_state(SubmissionState::Succeeded);
            }
            Err(message) => {
                self.notifier.error(id, message);
                self.set_state(SubmissionState::Failed(message.clone()));
            }
        }

        guard.settled = true;
        outcome.is_ok()
    }

    async fn post(&self, kind: FormKind, payload: &Value) -> Result<String, String> {
        let url = format!("{}{}", self.base_url, kind.endpoint_path());

        let resp = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("{} submission failed: {e}", kind.slug());
                GENERIC_ERROR.to_string()
            })?;

        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(Value::Null);
        let message = body
            .get("message")
            .and_then(|m| m.as_str())
            .filter(|m| !m.trim().is_empty())
            .map(|m| m.to_string());

        if status.is_success() {
            Ok(message.unwrap_or_else(|| kind.success_message().to_string()))
        } else {
            Err(message.unwrap_or_else(|| GENERIC_ERROR.to_string()))
        }
    }
}

/// Clears `in_flight` however `submit` ends, including when its future is
/// dropped mid-request.
struct InFlightGuard<'a> {
    submitter: &'a FormSubmitter,
    toast_id: &'static str,
    settled: bool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::debug!("Submission {} dropped before completing", self.toast_id);
            self.submitter.notifier.error(self.toast_id, INTERRUPTED_ERROR);
            self.submitter
                .set_state(SubmissionState::Failed(INTERRUPTED_ERROR.to_string()));
        }
        self.submitter.in_flight.store(false, Ordering::Release);
    }
}
