//! Taskdeck Store - document persistence
//!
//! The [`DocumentStore`] trait is the single seam between the dashboard
//! and wherever documents actually live:
//! - [`RestDocumentStore`] talks to the hosted document service
//! - [`MemoryStore`] backs tests and offline use
//!
//! Patches are first-class: a committed cell edit becomes a [`TaskPatch`]
//! carrying only the changed field.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod error;
pub mod memory;
pub mod patch;
pub mod rest;
pub mod store;

// Re-exports for convenience
pub use error::StoreError;
pub use memory::MemoryStore;
pub use patch::{ProjectPatch, TaskPatch};
pub use rest::RestDocumentStore;
pub use store::DocumentStore;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
