use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use serde_json::{Value, json};

use crate::error::AppError;
use crate::state::SharedState;
use crate::submission::{FormKind, fields};

pub const ZOHO_AUTH_FAILED: &str = "Authentication failed with Zoho. Please try again later.";

pub async fn subscribe(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let payload: Value = if body.is_empty() {
        json!({})
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::BadRequest(format!("Invalid JSON: {e}")))?
    };

    fields::validate(&payload, FormKind::Newsletter.fields()).map_err(AppError::BadRequest)?;

    let email = payload["email"].as_str().unwrap_or_default().trim();

    let message = state
        .connectors
        .newsletter
        .subscribe(email)
        .await
        .map_err(|e| {
            if e.status == Some(401) {
                tracing::warn!("Newsletter auth failure: {e}");
                AppError::Upstream(ZOHO_AUTH_FAILED.to_string())
            } else {
                AppError::from(e)
            }
        })?;

    Ok(Json(json!({ "success": true, "message": message })))
}
