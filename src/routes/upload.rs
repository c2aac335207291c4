use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;

use crate::connectors::UploadedMedia;
use crate::error::AppError;
use crate::state::SharedState;
use crate::submission::parser;

pub async fn upload(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<UploadedMedia>, AppError> {
    let file = parser::read_upload(&headers, body)
        .await
        .map_err(AppError::BadRequest)?
        .ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;

    let media = state.connectors.media.upload(file).await?;
    Ok(Json(media))
}
