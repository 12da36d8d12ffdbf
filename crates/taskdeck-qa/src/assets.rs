//! Asset host client
//!
//! Screenshots are uploaded before reports reference them; the host
//! answers with a stable URL.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::debug;

use crate::error::QaError;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

/// Stores raw image files and hands back stable URLs
#[async_trait]
pub trait AssetHost: Send + Sync {
    /// Upload one image, returning its URL
    async fn upload_image(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, QaError>;
}

/// HTTP client for the asset host
#[derive(Debug, Clone)]
pub struct HttpAssetHost {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAssetHost {
    /// Create a client with its own connection pool and timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, QaError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a client from an existing [`reqwest::Client`]
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url }
    }
}

#[async_trait]
impl AssetHost for HttpAssetHost {
    async fn upload_image(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, QaError> {
        debug!(file_name, bytes = bytes.len(), "uploading image asset");
        let form = Form::new().part(
            "file",
            Part::bytes(bytes)
                .file_name(file_name.to_string())
                .mime_str("image/png")?,
        );

        let response = self
            .client
            .post(format!("{}/assets", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(QaError::Service {
                status: status.as_u16(),
                message: text,
            });
        }
        let parsed: UploadResponse = serde_json::from_str(&text)?;
        Ok(parsed.url)
    }
}
