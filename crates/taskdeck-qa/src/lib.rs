//! Taskdeck QA - visual checks and their local history
//!
//! Clients for the visual QA surface:
//! - [`HttpVisualQaClient`] runs UX validation, regression scans, and
//!   structured UI comparisons
//! - [`HttpAssetHost`] uploads screenshots and returns stable URLs
//! - [`ReportHistory`] keeps the last few reports on the device
//!
//! The history is advisory only; the remote store stays authoritative
//! for anything that matters.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod assets;
pub mod client;
pub mod error;
pub mod history;
pub mod report;

// Re-exports for convenience
pub use assets::{AssetHost, HttpAssetHost};
pub use client::{HttpVisualQaClient, Tolerance, VisualQaApi};
pub use error::QaError;
pub use history::ReportHistory;
pub use report::{
    ChangeSeverity, ComparisonRecord, ComparisonReport, ComparisonStatus, DetectedChange,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
