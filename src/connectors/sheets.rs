use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{ConnectorError, SheetsConnector, extract_message};
use crate::config::SheetsConfig;

const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Google Sheets row appends authenticated as a service account.
pub struct GoogleSheets {
    client: reqwest::Client,
    config: SheetsConfig,
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl GoogleSheets {
    pub fn new(client: reqwest::Client, config: SheetsConfig) -> Self {
        Self { client, config }
    }

    fn assertion(&self) -> Result<String, ConnectorError> {
        let now = Utc::now().timestamp();
        let claims = AssertionClaims {
            iss: &self.config.client_email,
            scope: SHEETS_SCOPE,
            aud: &self.config.token_uri,
            iat: now,
            exp: now + 3600,
        };
        let key = EncodingKey::from_rsa_pem(self.config.private_key.as_bytes())
            .map_err(|e| ConnectorError::from(format!("Invalid Google private key: {e}")))?;

        encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| ConnectorError::from(format!("Failed to sign Google assertion: {e}")))
    }

    async fn access_token(&self) -> Result<String, ConnectorError> {
        let assertion = self.assertion()?;

        let resp = self
            .client
            .post(&self.config.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| ConnectorError::from(format!("Google token request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body: Value = resp.json().await.unwrap_or(Value::Null);
            let message = extract_message(&body)
                .unwrap_or_else(|| "Google authentication failed".to_string());
            return Err(ConnectorError::with_status(message, status.as_u16()));
        }

        let token: TokenResponse = resp
            .json()
            .await
            .map_err(|e| ConnectorError::from(format!("Invalid Google token response: {e}")))?;
        Ok(token.access_token)
    }
}

#[async_trait]
impl SheetsConnector for GoogleSheets {
    async fn append_row(&self, tab: &str, row: Vec<String>) -> Result<(), ConnectorError> {
        let token = self.access_token().await?;
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}!A1:append",
            self.config.api_url, self.config.sheet_id, tab
        );

        let resp = self
            .client
            .post(&url)
            .bearer_auth(token)
            .query(&[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&json!({ "values": [row] }))
            .send()
            .await
            .map_err(|e| ConnectorError::from(format!("Sheets append request failed: {e}")))?;

        let status = resp.status();
        if status.is_success() {
            tracing::debug!("Appended row to sheet tab {tab}");
            return Ok(());
        }

        let body: Value = resp.json().await.unwrap_or(Value::Null);
        let message =
            extract_message(&body).unwrap_or_else(|| "Failed to save submission".to_string());
        Err(ConnectorError::with_status(message, status.as_u16()))
    }
}
