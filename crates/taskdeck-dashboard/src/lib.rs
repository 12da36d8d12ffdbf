//! Taskdeck Dashboard - session-scoped orchestration
//!
//! One [`DashboardService`] per signed-in session, wiring:
//! - the document store behind [`taskdeck_store::DocumentStore`]
//! - the identity provider, scoping project queries to their owner
//! - the planning analysis, visual QA, asset, and test-generation clients
//! - the inline-edit session and the recent-report history
//!
//! # Example
//!
//! ```rust,ignore
//! use taskdeck_dashboard::DashboardService;
//!
//! let service = DashboardService::from_config(identity, &config, planning)?;
//! let overview = service.project_overview(&project_id).await?;
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod error;
pub mod import;
pub mod service;

// Re-exports for convenience
pub use error::DashboardError;
pub use import::{ImportError, ImportRow};
pub use service::{
    DashboardClients, DashboardService, ProjectAnalysis, ProjectOverview, TaskUpdate,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
