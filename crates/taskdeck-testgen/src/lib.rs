//! Client crate for the test-generation service.
//!
//! Provides:
//!
//! - [`GenerationRequest`] with the defaulting rules applied at submit time
//! - [`TestGenApi`] and its HTTP implementation [`HttpTestGenClient`]
//! - Suite export helpers with per-format file extensions
//!
//! # Example
//!
//! ```rust,ignore
//! use taskdeck_testgen::{GenerationRequest, HttpTestGenClient, TestGenApi};
//!
//! let client = HttpTestGenClient::new(base_url, timeout)?;
//! let request = GenerationRequest::new(project_id, story)
//!     .with_criteria_text("logged-in users see the cart\nempty carts show a hint");
//! let suite = client.generate_suite(&request).await?;
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod client;
pub mod error;
pub mod types;

pub use client::{HttpTestGenClient, TestGenApi};
pub use error::TestgenError;
pub use types::{
    export_filename, split_criteria, ExportFormat, ExportedSuite, GenerationRequest, TestCase,
    TestSuite, DEFAULT_COMPONENT_CONTEXT, DEFAULT_PRIORITY, DEFAULT_TARGET_FORMAT,
};

/// Crate version, taken from the manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
