//! Store error types

/// Failures from document store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The document does not exist; only patch operations raise this
    #[error("document not found: {0}")]
    NotFound(String),

    /// The request never completed (connect, timeout, redirect trouble)
    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered with a non-success status
    #[error("store returned {status}: {message}")]
    Service {
        /// HTTP status code
        status: u16,
        /// Response body, as text
        message: String,
    },

    /// The response body did not match the expected shape
    #[error("failed to decode store response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl StoreError {
    /// Whether this is an absent-document failure
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }

    /// Whether the failure happened before any response arrived
    #[inline]
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, StoreError::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_classified() {
        let err = StoreError::NotFound("tasks/t1".to_string());
        assert!(err.is_not_found());
        assert!(!err.is_transport());
        assert_eq!(err.to_string(), "document not found: tasks/t1");
    }

    #[test]
    fn service_errors_carry_status_and_body() {
        let err = StoreError::Service {
            status: 500,
            message: "backend exploded".to_string(),
        };
        assert_eq!(err.to_string(), "store returned 500: backend exploded");
    }
}
