//! QA error types

/// Failures from the visual QA pipeline
#[derive(Debug, thiserror::Error)]
pub enum QaError {
    /// The request never completed
    #[error("qa request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The QA service answered with a non-success status
    #[error("qa service returned {status}: {message}")]
    Service {
        /// HTTP status code
        status: u16,
        /// Response body, as text
        message: String,
    },

    /// The response body did not match the expected shape
    #[error("failed to decode qa response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The local history file could not be read or written
    #[error("report history i/o failed: {0}")]
    History(#[from] std::io::Error),
}

impl QaError {
    /// Whether the failure happened before any response arrived
    #[inline]
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, QaError::Transport(_))
    }
}
