//! Taskdeck Planning - the analysis pipeline
//!
//! Everything between a project's task list and the planning analysis
//! service:
//! - [`normalize`] turns loose task records into the validated request
//! - [`HttpAnalysisClient`] runs the request, formatting failures
//! - [`insights_for`] joins per-task findings back to the task list
//! - [`suggestions_for`] derives one applicable optimization per task
//!
//! The team roster and sprint constants ride along from
//! [`PlanningConfig`] rather than being baked into the request builder.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod client;
pub mod config;
pub mod error;
pub mod insights;
pub mod request;
pub mod response;
pub mod suggestion;

// Re-exports for convenience
pub use client::{AnalysisApi, HttpAnalysisClient};
pub use config::{PlanningConfig, TeamMember};
pub use error::PlanningError;
pub use insights::{insights_for, summary, InsightsSummary, TaskInsight};
pub use request::{normalize, AnalysisRequest, AnalysisTask, RawTask};
pub use response::{AnalysisResponse, TaskAnalysis};
pub use suggestion::{suggestion_for, suggestions_for, Suggestion};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
