//! Visual QA service client
//!
//! Three endpoints on one service:
//! - `POST /validateux`: one screenshot, free-form UX findings
//! - `POST /visualregressions`: two screenshots as base64 JSON, free-form
//!   regression findings
//! - `POST /uicomparison`: two screenshots as multipart files plus a
//!   tolerance, returning the structured [`ComparisonReport`]

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::multipart::{Form, Part};
use serde_json::{json, Value};
use tracing::debug;

use crate::error::QaError;
use crate::report::ComparisonReport;

/// Pixel-difference tolerance for UI comparison, 0..=20
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tolerance(u8);

impl Tolerance {
    /// Largest accepted tolerance
    pub const MAX: u8 = 20;

    /// Create a tolerance, clamping into 0..=20
    #[inline]
    #[must_use]
    pub fn new(value: u8) -> Self {
        Self(value.min(Self::MAX))
    }

    /// Tolerance value
    #[inline]
    #[must_use]
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self(5)
    }
}

/// The visual QA service
#[async_trait]
pub trait VisualQaApi: Send + Sync {
    /// UX validation over one screenshot
    async fn validate_ux(&self, screenshot: &[u8]) -> Result<Value, QaError>;

    /// Regression scan over a baseline and a current screenshot
    async fn visual_regressions(
        &self,
        baseline: &[u8],
        current: &[u8],
    ) -> Result<Value, QaError>;

    /// Structured pixel comparison at a given tolerance
    async fn ui_comparison(
        &self,
        baseline: Vec<u8>,
        comparison: Vec<u8>,
        tolerance: Tolerance,
    ) -> Result<ComparisonReport, QaError>;
}

/// HTTP client for the visual QA service
#[derive(Debug, Clone)]
pub struct HttpVisualQaClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpVisualQaClient {
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

    /// Base URL this client talks to
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json(&self, endpoint: &str, body: Value) -> Result<Value, QaError> {
        let response = self
            .client
            .post(format!("{}{endpoint}", self.base_url))
            .json(&body)
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
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl VisualQaApi for HttpVisualQaClient {
    async fn validate_ux(&self, screenshot: &[u8]) -> Result<Value, QaError> {
        debug!(bytes = screenshot.len(), "requesting ux validation");
        let body = json!({ "image": BASE64.encode(screenshot) });
        self.post_json("/validateux", body).await
    }

    async fn visual_regressions(
        &self,
        baseline: &[u8],
        current: &[u8],
    ) -> Result<Value, QaError> {
        debug!(
            baseline_bytes = baseline.len(),
            current_bytes = current.len(),
            "requesting visual regression scan"
        );
        let body = json!({
            "baseline_image": BASE64.encode(baseline),
            "current_image": BASE64.encode(current),
        });
        self.post_json("/visualregressions", body).await
    }

    async fn ui_comparison(
        &self,
        baseline: Vec<u8>,
        comparison: Vec<u8>,
        tolerance: Tolerance,
    ) -> Result<ComparisonReport, QaError> {
        debug!(tolerance = tolerance.value(), "requesting ui comparison");
        let form = Form::new()
            .part(
                "baseline_image",
                Part::bytes(baseline)
                    .file_name("baseline.png")
                    .mime_str("image/png")?,
            )
            .part(
                "comparison_image",
                Part::bytes(comparison)
                    .file_name("comparison.png")
                    .mime_str("image/png")?,
            )
            .text("tolerance", tolerance.value().to_string());

        let response = self
            .client
            .post(format!("{}/uicomparison", self.base_url))
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
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerance_clamps_to_its_range() {
        assert_eq!(Tolerance::new(0).value(), 0);
        assert_eq!(Tolerance::new(20).value(), 20);
        assert_eq!(Tolerance::new(200).value(), 20);
        assert_eq!(Tolerance::default().value(), 5);
    }
}
