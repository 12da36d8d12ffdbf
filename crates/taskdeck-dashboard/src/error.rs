//! The dashboard error type
//!
//! One enum chaining every collaborator's error, so orchestration methods
//! return a single error type. Wrapping is transparent: the inner message
//! is what the user sees.

use taskdeck_core::config::ConfigError;
use taskdeck_core::identity::IdentityError;
use taskdeck_planning::PlanningError;
use taskdeck_qa::QaError;
use taskdeck_store::StoreError;
use taskdeck_testgen::TestgenError;

use crate::import::ImportError;

/// Any failure an orchestration operation can surface
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Document store failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Identity provider failure
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// Planning analysis failure
    #[error(transparent)]
    Planning(#[from] PlanningError),

    /// Visual QA or asset host failure
    #[error(transparent)]
    Qa(#[from] QaError),

    /// Test-generation service failure
    #[error(transparent)]
    Testgen(#[from] TestgenError),

    /// Configuration failure while building clients
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A bulk import stopped partway
    #[error(transparent)]
    Import(#[from] ImportError),
}

impl DashboardError {
    /// Whether the failure is a missing document
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, DashboardError::Store(err) if err.is_not_found())
    }

    /// Whether the failure came from the analysis service rejecting input
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, DashboardError::Planning(err) if err.is_validation())
    }

    /// The message to show the user
    #[must_use]
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
