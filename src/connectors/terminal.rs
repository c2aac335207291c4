use async_trait::async_trait;
use serde_json::Value;

use super::{ConnectorError, ShippingConnector, extract_message};
use crate::config::TerminalConfig;

/// Terminal Africa address lookups used by the logistics quote form.
pub struct TerminalAfrica {
    client: reqwest::Client,
    config: TerminalConfig,
}

impl TerminalAfrica {
    pub fn new(client: reqwest::Client, config: TerminalConfig) -> Self {
        Self { client, config }
    }

    /// GETs `path` and unwraps the `data` member of Terminal's envelope.
    async fn fetch(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, ConnectorError> {
        let resp = self
            .client
            .get(format!("{}{path}", self.config.base_url))
            .bearer_auth(&self.config.secret_key)
            .query(query)
            .send()
            .await
            .map_err(|e| ConnectorError::from(format!("Terminal Africa request failed: {e}")))?;

        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(Value::Null);

        if !status.is_success() || body.get("status").and_then(|s| s.as_bool()) == Some(false) {
            let message = extract_message(&body)
                .unwrap_or_else(|| "Failed to fetch shipping locations".to_string());
            return Err(ConnectorError::with_status(message, status.as_u16()));
        }

        match body.get("data") {
            Some(data) => Ok(data.clone()),
            None => Err(ConnectorError::from(
                "Terminal Africa response missing data",
            )),
        }
    }
}

#[async_trait]
impl ShippingConnector for TerminalAfrica {
    async fn countries(&self) -> Result<Value, ConnectorError> {
        self.fetch("/countries", &[]).await
    }

    async fn states(&self, country_code: &str) -> Result<Value, ConnectorError> {
        self.fetch("/states", &[("country_code", country_code)]).await
    }

    async fn cities(&self, country_code: &str, state_code: &str) -> Result<Value, ConnectorError> {
        self.fetch(
            "/cities",
            &[("country_code", country_code), ("state_code", state_code)],
        )
        .await
    }
}
