use std::sync::Arc;

use crate::config::Config;
use crate::connectors::Connectors;
use crate::cors::CorsPolicy;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub cors: CorsPolicy,
    pub connectors: Connectors,
}
