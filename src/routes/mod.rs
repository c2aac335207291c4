pub mod forms;
pub mod geo;
pub mod newsletter;
pub mod shipping;
pub mod signup;
pub mod upload;

use axum::Router;
use axum::routing::{get, post};

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Newsletter
        .route("/api/newsletter", post(newsletter::subscribe))
        // Shop accounts
        .route("/api/shop/users/obana-sign-up", post(signup::sign_up))
        // Sheet-backed forms
        .route("/api/forms/{kind}", post(forms::submit))
        // Media
        .route("/api/upload", post(upload::upload))
        // Locations
        .route("/api/get-states", get(geo::get_states))
        .route("/api/shipping/countries", get(shipping::countries))
        .route("/api/shipping/states", get(shipping::states))
        .route("/api/shipping/cities", get(shipping::cities))
}
