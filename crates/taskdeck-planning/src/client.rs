//! Analysis service client
//!
//! One endpoint: `POST /planning/analyze`. Non-success responses become
//! a single formatted message; when the service returns structured
//! validation errors, their messages are joined with newlines so the
//! caller can show them verbatim.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::PlanningError;
use crate::request::AnalysisRequest;
use crate::response::AnalysisResponse;

/// The planning analysis service
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    /// Run one analysis over the normalized request
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, PlanningError>;
}

/// HTTP client for the analysis service
#[derive(Debug, Clone)]
pub struct HttpAnalysisClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAnalysisClient {
    /// Create a client with its own connection pool and timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, PlanningError> {
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
}

#[async_trait]
impl AnalysisApi for HttpAnalysisClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, PlanningError> {
        let request_id = Uuid::new_v4();
        debug!(%request_id, tasks = request.tasks.len(), "requesting planning analysis");

        let response = self
            .client
            .post(format!("{}/planning/analyze", self.base_url))
            .header("x-request-id", request_id.to_string())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let message = service_message(&body);
            warn!(%request_id, status = status.as_u16(), "analysis request rejected");
            return Err(PlanningError::Service {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Extract a display message from an error body
///
/// Handles the service's three shapes: `detail` as a validation-entry
/// array (messages joined with newlines), `detail` as a plain string,
/// and anything else (raw body).
fn service_message(body: &str) -> String {
    let Ok(parsed) = serde_json::from_str::<Value>(body) else {
        return body.to_string();
    };
    match parsed.get("detail") {
        Some(Value::Array(entries)) => entries
            .iter()
            .map(|entry| match entry.get("msg").and_then(Value::as_str) {
                Some(msg) => msg.to_string(),
                None => entry.to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Some(Value::String(detail)) => detail.clone(),
        _ => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_arrays_join_with_newlines() {
        let body = r#"{"detail":[
            {"loc":["tasks",0,"story_points"],"msg":"value is not a valid integer"},
            {"loc":["tasks",1,"due_date"],"msg":"invalid date format"}
        ]}"#;
        assert_eq!(
            service_message(body),
            "value is not a valid integer\ninvalid date format"
        );
    }

    #[test]
    fn string_details_pass_through() {
        assert_eq!(
            service_message(r#"{"detail":"analysis engine offline"}"#),
            "analysis engine offline"
        );
    }

    #[test]
    fn unstructured_bodies_pass_through_raw() {
        assert_eq!(service_message("gateway timeout"), "gateway timeout");
        assert_eq!(service_message(r#"{"error":"nope"}"#), r#"{"error":"nope"}"#);
    }

    #[test]
    fn entries_without_msg_fall_back_to_their_json() {
        let body = r#"{"detail":[{"code":17}]}"#;
        assert_eq!(service_message(body), r#"{"code":17}"#);
    }
}
