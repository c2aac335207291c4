pub mod client;
pub mod config;
pub mod connectors;
pub mod cors;
pub mod error;
pub mod routes;
pub mod state;
pub mod submission;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue};
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::connectors::Connectors;
use crate::cors::CorsPolicy;
use crate::state::{AppState, SharedState};

/// Build the application with real connectors derived from `config`.
pub fn build_app(config: Config) -> Result<Router, String> {
    let connectors = Connectors::from_config(&config)?;
    build_app_with(config, connectors)
}

pub fn build_app_with(config: Config, connectors: Connectors) -> Result<Router, String> {
    let max_body_size = config.max_body_size;

    let state: SharedState = Arc::new(AppState {
        cors: CorsPolicy::new(&config.cors)?,
        config,
        connectors,
    });

    // Body limit inside CORS so a 413 keeps the allow-origin header
    let api = routes::api_routes()
        .layer(
            ServiceBuilder::new()
                .layer(DefaultBodyLimit::disable())
                .layer(RequestBodyLimitLayer::new(max_body_size)),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            cors::apply_cors,
        ));

    let app = Router::new()
        .merge(api)
        .route("/health", axum::routing::get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                )),
        )
        .with_state(state);

    Ok(app)
}

async fn health() -> &'static str {
    "ok"
}
