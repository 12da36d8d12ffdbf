//! HTTP client for the test-generation service.
//!
//! Routes exposed by the service:
//!
//! - `POST /generate` creates a suite from a story and its criteria
//! - `GET /{id}` fetches one suite
//! - `GET /?project_id=` lists suites for a project
//! - `GET /{id}/export/{format}` renders a suite for download
//! - `DELETE /{id}` removes a suite
//!
//! Error bodies are unwrapped detail-first: a JSON `detail` string wins,
//! otherwise the raw body is surfaced.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use taskdeck_core::types::ProjectId;

use crate::error::TestgenError;
use crate::types::{export_filename, ExportFormat, ExportedSuite, GenerationRequest, TestSuite};

/// Client seam for the test-generation service.
#[async_trait]
pub trait TestGenApi: Send + Sync {
    /// Generates a new suite from the given request.
    async fn generate_suite(&self, request: &GenerationRequest) -> Result<TestSuite, TestgenError>;

    /// Fetches one suite by id.
    async fn suite(&self, suite_id: &str) -> Result<TestSuite, TestgenError>;

    /// Lists the suites generated for a project.
    async fn suites_for_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<TestSuite>, TestgenError>;

    /// Renders a suite in the given format for download.
    async fn export_suite(
        &self,
        suite_id: &str,
        format: ExportFormat,
    ) -> Result<ExportedSuite, TestgenError>;

    /// Deletes a suite.
    async fn delete_suite(&self, suite_id: &str) -> Result<(), TestgenError>;
}

/// `TestGenApi` implementation over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTestGenClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTestGenClient {
    /// Builds a client for the service at `base_url` with the given timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TestgenError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Builds a client reusing an existing `reqwest::Client`.
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url }
    }

    /// Base URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn read_body(response: reqwest::Response) -> Result<String, TestgenError> {
        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            return Ok(body);
        }
        let message = service_detail(&body);
        warn!(status = status.as_u16(), %message, "testgen service rejected the call");
        Err(TestgenError::Service {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, TestgenError> {
        let body = Self::read_body(response).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl TestGenApi for HttpTestGenClient {
    async fn generate_suite(&self, request: &GenerationRequest) -> Result<TestSuite, TestgenError> {
        debug!(
            project_id = %request.project_id,
            criteria = request.acceptance_criteria.len(),
            format = %request.target_format,
            "generating test suite"
        );
        let response = self
            .client
            .post(self.url("/generate"))
            .json(request)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn suite(&self, suite_id: &str) -> Result<TestSuite, TestgenError> {
        let response = self.client.get(self.url(&format!("/{suite_id}"))).send().await?;
        Self::decode(response).await
    }

    async fn suites_for_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<TestSuite>, TestgenError> {
        let response = self
            .client
            .get(self.url("/"))
            .query(&[("project_id", project_id.as_str())])
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn export_suite(
        &self,
        suite_id: &str,
        format: ExportFormat,
    ) -> Result<ExportedSuite, TestgenError> {
        let response = self
            .client
            .get(self.url(&format!("/{suite_id}/export/{format}")))
            .send()
            .await?;
        let content = Self::read_body(response).await?;
        Ok(ExportedSuite {
            file_name: export_filename(suite_id, format),
            content,
        })
    }

    async fn delete_suite(&self, suite_id: &str) -> Result<(), TestgenError> {
        debug!(suite_id, "deleting test suite");
        let response = self
            .client
            .delete(self.url(&format!("/{suite_id}")))
            .send()
            .await?;
        Self::read_body(response).await.map(|_| ())
    }
}

/// Extracts the most useful message from an error body.
///
/// The service reports failures as `{"detail": "..."}`; anything else is
/// passed through verbatim.
fn service_detail(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => match value.get("detail").and_then(|detail| detail.as_str()) {
            Some(detail) => detail.to_string(),
            None => body.to_string(),
        },
        Err(_) => body.to_string(),
    }
}
