use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::Value;

use super::{ConnectorError, MediaConnector, Upload, UploadedMedia, extract_message};
use crate::config::CloudinaryConfig;

/// Unsigned uploads through a Cloudinary upload preset.
pub struct Cloudinary {
    client: reqwest::Client,
    config: CloudinaryConfig,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

impl Cloudinary {
    pub fn new(client: reqwest::Client, config: CloudinaryConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl MediaConnector for Cloudinary {
    async fn upload(&self, file: Upload) -> Result<UploadedMedia, ConnectorError> {
        let size = file.bytes.len();
        let mut part = Part::bytes(file.bytes.to_vec()).file_name(file.file_name.clone());
        if let Some(ct) = &file.content_type {
            part = part
                .mime_str(ct)
                .map_err(|e| ConnectorError::from(format!("Invalid content type {ct}: {e}")))?;
        }

        let form = Form::new()
            .part("file", part)
            .text("upload_preset", self.config.upload_preset.clone());

        let resp = self
            .client
            .post(format!(
                "{}/v1_1/{}/auto/upload",
                self.config.api_url, self.config.cloud_name
            ))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ConnectorError::from(format!("Cloudinary upload failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body: Value = resp.json().await.unwrap_or(Value::Null);
            let message = extract_message(&body).unwrap_or_else(|| "Upload failed".to_string());
            return Err(ConnectorError::with_status(message, status.as_u16()));
        }

        let uploaded: UploadResponse = resp
            .json()
            .await
            .map_err(|e| ConnectorError::from(format!("Invalid Cloudinary response: {e}")))?;

        tracing::info!("Uploaded {} ({size} bytes) as {}", file.file_name, uploaded.public_id);

        Ok(UploadedMedia {
            url: uploaded.secure_url,
            public_id: uploaded.public_id,
        })
    }
}
