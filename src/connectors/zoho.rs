use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{ConnectorError, NewsletterConnector, extract_message};
use crate::config::ZohoConfig;

pub const SUBSCRIBE_FALLBACK_MESSAGE: &str = "Failed to subscribe. Please try again later.";

/// Zoho Campaigns list subscription.
pub struct ZohoCampaigns {
    client: reqwest::Client,
    config: ZohoConfig,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
}

impl ZohoCampaigns {
    pub fn new(client: reqwest::Client, config: ZohoConfig) -> Self {
        Self { client, config }
    }

    /// Exchanges the long-lived refresh token for a short-lived access token.
    async fn access_token(&self) -> Result<String, ConnectorError> {
        let resp = self
            .client
            .post(format!("{}/oauth/v2/token", self.config.accounts_url))
            .query(&[
                ("refresh_token", self.config.refresh_token.as_str()),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| ConnectorError::from(format!("Zoho token request failed: {e}")))?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ConnectorError::with_status("Zoho rejected the refresh token", 401));
        }
        if !status.is_success() {
            return Err(ConnectorError::with_status(
                format!("Zoho token request returned {status}"),
                status.as_u16(),
            ));
        }

        let token: TokenResponse = resp
            .json()
            .await
            .map_err(|e| ConnectorError::from(format!("Invalid Zoho token response: {e}")))?;

        // Zoho reports bad credentials as 200 with an `error` field
        match token.access_token {
            Some(t) if !t.is_empty() => Ok(t),
            _ => Err(ConnectorError::with_status(
                format!(
                    "Zoho token exchange failed: {}",
                    token.error.unwrap_or_else(|| "no access token".to_string())
                ),
                401,
            )),
        }
    }
}

#[async_trait]
impl NewsletterConnector for ZohoCampaigns {
    async fn subscribe(&self, email: &str) -> Result<String, ConnectorError> {
        let token = self.access_token().await?;
        let contact_info = json!({ "Contact Email": email }).to_string();

        let resp = self
            .client
            .post(format!(
                "{}/api/v1.1/json/listsubscribe",
                self.config.campaigns_url
            ))
            .query(&[
                ("resfmt", "JSON"),
                ("listkey", self.config.list_key.as_str()),
                ("contactinfo", contact_info.as_str()),
            ])
            .header("Authorization", format!("Zoho-oauthtoken {token}"))
            .send()
            .await
            .map_err(|e| ConnectorError::from(format!("Zoho subscribe request failed: {e}")))?;

        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(Value::Null);

        if status == StatusCode::UNAUTHORIZED {
            let message = extract_message(&body)
                .unwrap_or_else(|| SUBSCRIBE_FALLBACK_MESSAGE.to_string());
            return Err(ConnectorError::with_status(message, 401));
        }

        if body.get("status").and_then(|s| s.as_str()) == Some("success") {
            let message = body
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("Subscribed successfully")
                .to_string();
            tracing::info!("Subscribed {email} to newsletter list");
            return Ok(message);
        }

        let message =
            extract_message(&body).unwrap_or_else(|| SUBSCRIBE_FALLBACK_MESSAGE.to_string());
        Err(ConnectorError::with_status(message, status.as_u16()))
    }
}
