use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::AppError;
use crate::state::SharedState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationQuery {
    pub country_code: Option<String>,
    pub state_code: Option<String>,
}

fn required<'a>(value: &'a Option<String>, label: &str) -> Result<&'a str, AppError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("{label} is required")))
}

pub async fn countries(State(state): State<SharedState>) -> Result<Json<Value>, AppError> {
    let data = state.connectors.shipping.countries().await?;
    Ok(Json(json!({ "success": true, "data": data })))
}

pub async fn states(
    State(state): State<SharedState>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<Value>, AppError> {
    let country_code = required(&query.country_code, "Country code")?;
    let data = state.connectors.shipping.states(country_code).await?;
    Ok(Json(json!({ "success": true, "data": data })))
}

pub async fn cities(
    State(state): State<SharedState>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<Value>, AppError> {
    let country_code = required(&query.country_code, "Country code")?;
    let state_code = required(&query.state_code, "State code")?;
    let data = state
        .connectors
        .shipping
        .cities(country_code, state_code)
        .await?;
    Ok(Json(json!({ "success": true, "data": data })))
}
