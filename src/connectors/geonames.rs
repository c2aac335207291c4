use async_trait::async_trait;
use serde_json::Value;

use super::{ConnectorError, GeoConnector, StateQuery};
use crate::config::GeonamesConfig;

const DEFAULT_FEATURE_CLASS: &str = "A";
const DEFAULT_MAX_ROWS: &str = "1000";

pub struct Geonames {
    client: reqwest::Client,
    config: GeonamesConfig,
}

impl Geonames {
    pub fn new(client: reqwest::Client, config: GeonamesConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl GeoConnector for Geonames {
    async fn search_states(&self, query: &StateQuery) -> Result<Value, ConnectorError> {
        let country = query.country.as_deref().unwrap_or_default();
        let feature_class = query
            .feature_class
            .as_deref()
            .unwrap_or(DEFAULT_FEATURE_CLASS);
        let max_rows = query.max_rows.as_deref().unwrap_or(DEFAULT_MAX_ROWS);
        let username = query
            .username
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or(&self.config.username);

        let resp = self
            .client
            .get(format!("{}/searchJSON", self.config.api_url))
            .query(&[
                ("country", country),
                ("featureClass", feature_class),
                ("featureCode", "ADM1"),
                ("maxRows", max_rows),
                ("username", username),
            ])
            .send()
            .await
            .map_err(|e| ConnectorError::from(format!("Geonames request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ConnectorError::with_status(
                format!("Geonames returned {status}"),
                status.as_u16(),
            ));
        }

        resp.json()
            .await
            .map_err(|e| ConnectorError::from(format!("Invalid Geonames response: {e}")))
    }
}
