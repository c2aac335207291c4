use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use chrono::Utc;
use serde_json::{Value, json};

use crate::error::AppError;
use crate::state::SharedState;
use crate::submission::{FormKind, fields, parser};

/// Stores a sheet-backed form (quotes, financing applications, contact) as one row.
pub async fn submit(
    State(state): State<SharedState>,
    Path(kind): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let (kind, tab) = FormKind::from_slug(&kind)
        .and_then(|k| k.sheet_tab().map(|tab| (k, tab)))
        .ok_or_else(|| AppError::NotFound("Unknown form type".to_string()))?;

    let content_type = headers.get("content-type").and_then(|v| v.to_str().ok());
    let payload = parser::parse_body(content_type, &body).map_err(AppError::BadRequest)?;

    fields::validate(&payload, kind.fields()).map_err(AppError::BadRequest)?;

    let mut row = vec![Utc::now().to_rfc3339()];
    row.extend(fields::to_row(&payload, kind.fields()));

    state.connectors.sheets.append_row(tab, row).await?;
    tracing::info!("Stored {} submission", kind.slug());

    Ok(Json(json!({
        "success": true,
        "message": kind.success_message(),
    })))
}
