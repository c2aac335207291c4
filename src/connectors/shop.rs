use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;

use super::{ConnectorError, SignupConnector, UpstreamResponse};
use crate::config::ShopConfig;

pub const SIGNUP_PATH: &str = "/shop/users/obana-sign-up";

/// The shop backend that owns customer accounts.
pub struct ShopBackend {
    client: reqwest::Client,
    config: ShopConfig,
}

impl ShopBackend {
    pub fn new(client: reqwest::Client, config: ShopConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl SignupConnector for ShopBackend {
    async fn sign_up(&self, body: Bytes) -> Result<UpstreamResponse, ConnectorError> {
        let resp = self
            .client
            .post(format!("{}{SIGNUP_PATH}", self.config.api_url))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| ConnectorError::from(format!("Signup request failed: {e}")))?;

        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let body = resp
            .bytes()
            .await
            .map_err(|e| ConnectorError::from(format!("Failed to read signup response: {e}")))?;

        if !(200..300).contains(&status) {
            let preview: String = String::from_utf8_lossy(&body).chars().take(1024).collect();
            tracing::warn!("Shop signup returned {status}: {preview}");
        }

        Ok(UpstreamResponse {
            status,
            content_type,
            body,
        })
    }
}
