//! Planning error types

/// Failures from the planning pipeline
#[derive(Debug, thiserror::Error)]
pub enum PlanningError {
    /// The analysis request never completed
    #[error("analysis request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The analysis service answered with a non-success status
    ///
    /// `message` is already formatted for display: validation messages
    /// come joined with newlines.
    #[error("analysis service returned {status}: {message}")]
    Service {
        /// HTTP status code
        status: u16,
        /// Formatted service message
        message: String,
    },

    /// The response body did not match the expected shape
    #[error("failed to decode analysis response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Could not read the planning config file
    #[error("failed to read planning config: {0}")]
    ConfigRead(#[from] std::io::Error),

    /// The planning config file is not valid TOML for this schema
    #[error("failed to parse planning config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl PlanningError {
    /// Whether the service rejected the request body
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, PlanningError::Service { status: 422, .. })
    }
}
