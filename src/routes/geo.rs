use axum::Json;
use axum::extract::{Query, State};
use serde_json::Value;

use crate::connectors::StateQuery;
use crate::error::AppError;
use crate::state::SharedState;

pub async fn get_states(
    State(state): State<SharedState>,
    Query(query): Query<StateQuery>,
) -> Result<Json<Value>, AppError> {
    if query.country.as_deref().is_none_or(|c| c.trim().is_empty()) {
        return Err(AppError::BadRequest("Country is required".to_string()));
    }

    let result = state
        .connectors
        .geo
        .search_states(&query)
        .await
        .map_err(|e| {
            tracing::error!("Geonames lookup failed: {e}");
            AppError::Upstream("Failed to fetch states".to_string())
        })?;

    Ok(Json(result))
}
