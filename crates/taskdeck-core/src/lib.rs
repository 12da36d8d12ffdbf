//! Taskdeck Core - domain models and rules
//!
//! The foundation the rest of the workspace builds on:
//! - Projects, tasks, and their typed identifiers
//! - Derived risk scoring and aggregate task metrics
//! - Due-date interpretation across text, serial, and timestamp forms
//! - The inline cell-edit state machine
//! - Table column configuration
//! - The identity provider contract
//!
//! # Example
//!
//! ```rust,ignore
//! use taskdeck_core::{NewTask, ProjectId, TaskMetrics, TaskStatus};
//!
//! let task = NewTask::new(ProjectId::generate(), "Checkout flow")
//!     .with_assignee("Sarah Johnson")
//!     .with_story_points(8)
//!     .with_status(TaskStatus::InProgress);
//!
//! assert_eq!(task.story_points, 8);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod columns;
pub mod config;
pub mod date;
pub mod edit;
pub mod identity;
pub mod metrics;
pub mod risk;
pub mod types;

// Re-exports for convenience
pub use columns::{Column, ColumnError, ColumnSet, ColumnType};
pub use config::{ConfigError, TaskdeckConfig};
pub use edit::{
    CellRef, CellSwitch, CellSwitchPolicy, EditField, EditSession, EditState, PendingEdit,
};
pub use identity::{AuthUser, IdentityError, IdentityProvider};
pub use metrics::TaskMetrics;
pub use risk::{risk_score, RiskBand, HIGH_RISK_THRESHOLD, MAX_RISK, MEDIUM_RISK_THRESHOLD};
pub use types::{
    DueDateValue, NewProject, NewTask, Project, ProjectId, Task, TaskId, TaskStatus, UserId,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with Taskdeck Core
    pub use crate::{
        CellSwitchPolicy, DueDateValue, EditField, EditSession, NewProject, NewTask, Project,
        ProjectId, RiskBand, Task, TaskdeckConfig, TaskId, TaskMetrics, TaskStatus, UserId,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
