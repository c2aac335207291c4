use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::error::AppError;
use crate::state::SharedState;

/// Proxies the signup body to the shop backend and relays its answer as-is.
pub async fn sign_up(State(state): State<SharedState>, body: Bytes) -> Result<Response, AppError> {
    if body.is_empty() {
        return Err(AppError::BadRequest("Request body is required".to_string()));
    }

    let upstream = state.connectors.signup.sign_up(body).await?;

    let status = StatusCode::from_u16(upstream.status).map_err(|e| {
        AppError::Internal(format!("Shop returned invalid status {}: {e}", upstream.status))
    })?;

    let mut response = (status, upstream.body).into_response();
    // Replace the octet-stream default with whatever the shop declared
    response.headers_mut().remove(CONTENT_TYPE);
    if let Some(value) = upstream
        .content_type
        .as_deref()
        .and_then(|ct| HeaderValue::from_str(ct).ok())
    {
        response.headers_mut().insert(CONTENT_TYPE, value);
    }

    Ok(response)
}
