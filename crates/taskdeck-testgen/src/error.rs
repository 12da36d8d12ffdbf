//! Error types for the test-generation client.

/// Errors raised while talking to the test-generation service.
#[derive(Debug, thiserror::Error)]
pub enum TestgenError {
    /// The request never reached the service or the connection dropped.
    #[error("testgen transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("testgen service error ({status}): {message}")]
    Service {
        /// HTTP status code returned by the service.
        status: u16,
        /// Detail message extracted from the response body.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("failed to decode testgen response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl TestgenError {
    /// Returns `true` when the error came back from the service itself
    /// rather than the transport.
    #[must_use]
    pub fn is_service(&self) -> bool {
        matches!(self, Self::Service { .. })
    }

    /// Returns `true` for connection-level failures.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
