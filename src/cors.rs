use axum::extract::{Request, State};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE, ORIGIN, VARY,
};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::config::CorsConfig;
use crate::state::SharedState;

const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type, Authorization, X-Requested-With";
const MAX_AGE_SECS: &str = "86400";

/// Origin allowlist shared by every `/api` route.
///
/// Origins outside the list are not rejected: they receive the first
/// allowlisted origin instead, which the browser then refuses to match.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allowed_origins: Vec<String>,
    preflight_status: StatusCode,
}

impl CorsPolicy {
    pub fn new(config: &CorsConfig) -> Result<Self, String> {
        if config.allowed_origins.is_empty() {
            return Err("CORS allowlist must contain at least one origin".to_string());
        }
        Ok(Self {
            allowed_origins: config.allowed_origins.clone(),
            preflight_status: config.preflight_status,
        })
    }

    pub fn preflight_status(&self) -> StatusCode {
        self.preflight_status
    }

    pub fn is_allowed(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|o| o == origin)
    }

    /// The value to send back as `Access-Control-Allow-Origin`.
    pub fn resolve_origin<'a>(&'a self, origin: Option<&'a str>) -> &'a str {
        match origin {
            Some(o) if self.is_allowed(o) => o,
            Some(o) => {
                tracing::debug!("Origin {o} not in allowlist, falling back to default");
                &self.allowed_origins[0]
            }
            None => &self.allowed_origins[0],
        }
    }

    pub fn apply(&self, request_origin: Option<&str>, headers: &mut HeaderMap) {
        let origin = self.resolve_origin(request_origin);
        match HeaderValue::from_str(origin) {
            Ok(value) => {
                headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, value);
            }
            Err(e) => tracing::warn!("Unusable origin header value {origin:?}: {e}"),
        }
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        );
        headers.insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static(MAX_AGE_SECS));
        headers.append(VARY, HeaderValue::from_static("origin"));
    }
}

/// Middleware that answers preflights and decorates every other response.
pub async fn apply_cors(State(state): State<SharedState>, req: Request, next: Next) -> Response {
    let origin = req
        .headers()
        .get(ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    let mut response = if *req.method() == Method::OPTIONS {
        state.cors.preflight_status().into_response()
    } else {
        next.run(req).await
    };

    state.cors.apply(origin.as_deref(), response.headers_mut());
    response
}
