pub mod cloudinary;
pub mod geonames;
pub mod sheets;
pub mod shop;
pub mod terminal;
pub mod zoho;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Config;

/// Failure reported by a third-party connector.
///
/// `status` carries the upstream HTTP status when the failure came from a
/// response rather than the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorError {
    pub message: String,
    pub status: Option<u16>,
}

impl ConnectorError {
    pub fn with_status(message: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
        }
    }
}

impl std::fmt::Display for ConnectorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (upstream status {status})", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ConnectorError {}

impl From<String> for ConnectorError {
    fn from(s: String) -> Self {
        ConnectorError {
            message: s,
            status: None,
        }
    }
}

impl From<&str> for ConnectorError {
    fn from(s: &str) -> Self {
        ConnectorError {
            message: s.to_string(),
            status: None,
        }
    }
}

#[async_trait]
pub trait NewsletterConnector: Send + Sync {
    /// Subscribe `email` to the campaign list. Returns the upstream message.
    async fn subscribe(&self, email: &str) -> Result<String, ConnectorError>;
}

#[async_trait]
pub trait SheetsConnector: Send + Sync {
    async fn append_row(&self, tab: &str, row: Vec<String>) -> Result<(), ConnectorError>;
}

#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedMedia {
    pub url: String,
    pub public_id: String,
}

#[async_trait]
pub trait MediaConnector: Send + Sync {
    async fn upload(&self, file: Upload) -> Result<UploadedMedia, ConnectorError>;
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateQuery {
    pub country: Option<String>,
    pub feature_class: Option<String>,
    pub max_rows: Option<String>,
    pub username: Option<String>,
}

#[async_trait]
pub trait GeoConnector: Send + Sync {
    /// Raw geocoding search result, passed through untouched.
    async fn search_states(&self, query: &StateQuery) -> Result<Value, ConnectorError>;
}

#[async_trait]
pub trait ShippingConnector: Send + Sync {
    async fn countries(&self) -> Result<Value, ConnectorError>;
    async fn states(&self, country_code: &str) -> Result<Value, ConnectorError>;
    async fn cities(&self, country_code: &str, state_code: &str) -> Result<Value, ConnectorError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

#[async_trait]
pub trait SignupConnector: Send + Sync {
    /// Forward `body` verbatim and hand back whatever the shop answered.
    async fn sign_up(&self, body: Bytes) -> Result<UpstreamResponse, ConnectorError>;
}

/// The connectors every route reaches through `AppState`.
#[derive(Clone)]
pub struct Connectors {
    pub newsletter: Arc<dyn NewsletterConnector>,
    pub sheets: Arc<dyn SheetsConnector>,
    pub media: Arc<dyn MediaConnector>,
    pub geo: Arc<dyn GeoConnector>,
    pub shipping: Arc<dyn ShippingConnector>,
    pub signup: Arc<dyn SignupConnector>,
}

impl Connectors {
    pub fn from_config(config: &Config) -> Result<Self, String> {
        let client = http_client(config.upstream_timeout)?;

        let newsletter: Arc<dyn NewsletterConnector> = match &config.zoho {
            Some(zoho) => Arc::new(zoho::ZohoCampaigns::new(client.clone(), zoho.clone())),
            None => Arc::new(Unconfigured("Newsletter service")),
        };
        let sheets: Arc<dyn SheetsConnector> = match &config.sheets {
            Some(cfg) => Arc::new(sheets::GoogleSheets::new(client.clone(), cfg.clone())),
            None => Arc::new(Unconfigured("Spreadsheet service")),
        };
        let media: Arc<dyn MediaConnector> = match &config.cloudinary {
            Some(cfg) => Arc::new(cloudinary::Cloudinary::new(client.clone(), cfg.clone())),
            None => Arc::new(Unconfigured("Media upload service")),
        };
        let geo: Arc<dyn GeoConnector> = match &config.geonames {
            Some(cfg) => Arc::new(geonames::Geonames::new(client.clone(), cfg.clone())),
            None => Arc::new(Unconfigured("Geolocation service")),
        };
        let shipping: Arc<dyn ShippingConnector> = match &config.terminal {
            Some(cfg) => Arc::new(terminal::TerminalAfrica::new(client.clone(), cfg.clone())),
            None => Arc::new(Unconfigured("Shipping service")),
        };
        let signup: Arc<dyn SignupConnector> = match &config.shop {
            Some(cfg) => Arc::new(shop::ShopBackend::new(client, cfg.clone())),
            None => Arc::new(Unconfigured("Shop service")),
        };

        for (name, configured) in [
            ("zoho", config.zoho.is_some()),
            ("google sheets", config.sheets.is_some()),
            ("cloudinary", config.cloudinary.is_some()),
            ("geonames", config.geonames.is_some()),
            ("terminal africa", config.terminal.is_some()),
            ("shop", config.shop.is_some()),
        ] {
            if !configured {
                tracing::warn!("{name} connector not configured");
            }
        }

        Ok(Self {
            newsletter,
            sheets,
            media,
            geo,
            shipping,
            signup,
        })
    }
}

pub fn http_client(timeout: Duration) -> Result<reqwest::Client, String> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| format!("Failed to build HTTP client: {e}"))
}

/// Best-effort human-readable message from an upstream error body.
pub fn extract_message(body: &Value) -> Option<String> {
    ["message", "error_description", "error", "detail"]
        .iter()
        .find_map(|key| match body.get(*key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            Some(Value::Object(inner)) => inner
                .get("message")
                .and_then(|m| m.as_str())
                .map(|s| s.to_string()),
            _ => None,
        })
}

/// Stand-in for a connector whose credentials are absent from the environment.
pub struct Unconfigured(pub &'static str);

impl Unconfigured {
    fn error(&self) -> ConnectorError {
        ConnectorError::from(format!("{} is not configured", self.0))
    }
}

#[async_trait]
impl NewsletterConnector for Unconfigured {
    async fn subscribe(&self, _email: &str) -> Result<String, ConnectorError> {
        Err(self.error())
    }
}

#[async_trait]
impl SheetsConnector for Unconfigured {
    async fn append_row(&self, _tab: &str, _row: Vec<String>) -> Result<(), ConnectorError> {
        Err(self.error())
    }
}

#[async_trait]
impl MediaConnector for Unconfigured {
    async fn upload(&self, _file: Upload) -> Result<UploadedMedia, ConnectorError> {
        Err(self.error())
    }
}

#[async_trait]
impl GeoConnector for Unconfigured {
    async fn search_states(&self, _query: &StateQuery) -> Result<Value, ConnectorError> {
        Err(self.error())
    }
}

#[async_trait]
impl ShippingConnector for Unconfigured {
    async fn countries(&self) -> Result<Value, ConnectorError> {
        Err(self.error())
    }

    async fn states(&self, _country_code: &str) -> Result<Value, ConnectorError> {
        Err(self.error())
    }

    async fn cities(&self, _country_code: &str, _state_code: &str) -> Result<Value, ConnectorError> {
        Err(self.error())
    }
}

#[async_trait]
impl SignupConnector for Unconfigured {
    async fn sign_up(&self, _body: Bytes) -> Result<UpstreamResponse, ConnectorError> {
        Err(self.error())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn extract_message_prefers_message_field() {
        let body = json!({ "message": "List not found", "error": "ignored" });
        assert_eq!(extract_message(&body).as_deref(), Some("List not found"));
    }

    #[test]
    fn extract_message_reads_nested_error_object() {
        let body = json!({ "error": { "message": "Invalid upload preset" } });
        assert_eq!(extract_message(&body).as_deref(), Some("Invalid upload preset"));
    }

    #[test]
    fn extract_message_skips_blank_values() {
        assert_eq!(extract_message(&json!({ "message": "  " })), None);
        assert_eq!(extract_message(&json!("plain string")), None);
    }
}
