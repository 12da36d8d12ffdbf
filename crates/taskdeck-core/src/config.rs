//! Workspace configuration
//!
//! One [`TaskdeckConfig`] is built at startup (defaults, builders, or a
//! TOML file) and handed to every client constructor. Each external call
//! gets an explicit timeout; the services differ enough in latency that
//! every collaborator's timeout is configured separately.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::edit::CellSwitchPolicy;

/// Configuration load and validation failures
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Could not read the config file
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    /// The file is not valid TOML for this schema
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A timeout is outside the accepted range
    #[error("timeout '{name}' of {secs}s is outside 1..=600")]
    InvalidTimeout {
        /// Which timeout field
        name: &'static str,
        /// Configured value
        secs: u64,
    },

    /// Report history must hold at least one entry
    #[error("history capacity must be at least 1")]
    InvalidCapacity,
}

/// Settings shared across the workspace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskdeckConfig {
    /// Base URL of the document store service
    pub store_base_url: String,
    /// Base URL of the planning analysis service
    pub analysis_base_url: String,
    /// Base URL of the visual QA service
    pub qa_base_url: String,
    /// Base URL of the asset host screenshots upload to
    pub assets_base_url: String,
    /// Base URL of the test-generation service
    pub testgen_base_url: String,
    /// Timeout for store reads and writes
    pub store_timeout_secs: u64,
    /// Timeout for planning analysis calls
    pub analysis_timeout_secs: u64,
    /// Timeout for visual QA calls
    pub qa_timeout_secs: u64,
    /// Timeout for asset uploads
    pub asset_timeout_secs: u64,
    /// Timeout for test-generation calls
    pub testgen_timeout_secs: u64,
    /// Entries kept in the local report history
    pub history_capacity: usize,
    /// Where the report history persists; in-memory only when unset
    pub history_path: Option<PathBuf>,
    /// What happens to unsaved drafts when the edited cell changes
    pub cell_switch_policy: CellSwitchPolicy,
}

impl Default for TaskdeckConfig {
    fn default() -> Self {
        Self {
            store_base_url: "http://localhost:8080".to_string(),
            analysis_base_url: "http://localhost:8000".to_string(),
            qa_base_url: "http://localhost:8000".to_string(),
            assets_base_url: "http://localhost:8001".to_string(),
            testgen_base_url: "http://localhost:8002".to_string(),
            store_timeout_secs: 30,
            analysis_timeout_secs: 120,
            qa_timeout_secs: 60,
            asset_timeout_secs: 60,
            testgen_timeout_secs: 120,
            history_capacity: 10,
            history_path: None,
            cell_switch_policy: CellSwitchPolicy::AbandonDraft,
        }
    }
}

impl TaskdeckConfig {
    /// Create a configuration with default settings
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string; missing keys take defaults
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// With the document store base URL
    #[inline]
    #[must_use]
    pub fn with_store_base_url(mut self, url: impl Into<String>) -> Self {
        self.store_base_url = url.into();
        self
    }

    /// With the analysis service base URL
    #[inline]
    #[must_use]
    pub fn with_analysis_base_url(mut self, url: impl Into<String>) -> Self {
        self.analysis_base_url = url.into();
        self
    }

    /// With the visual QA service base URL
    #[inline]
    #[must_use]
    pub fn with_qa_base_url(mut self, url: impl Into<String>) -> Self {
        self.qa_base_url = url.into();
        self
    }

    /// With the asset host base URL
    #[inline]
    #[must_use]
    pub fn with_assets_base_url(mut self, url: impl Into<String>) -> Self {
        self.assets_base_url = url.into();
        self
    }

    /// With the test-generation service base URL
    #[inline]
    #[must_use]
    pub fn with_testgen_base_url(mut self, url: impl Into<String>) -> Self {
        self.testgen_base_url = url.into();
        self
    }

    /// With the analysis timeout in seconds
    #[inline]
    #[must_use]
    pub fn with_analysis_timeout_secs(mut self, secs: u64) -> Self {
        self.analysis_timeout_secs = secs;
        self
    }

    /// With the history cache capacity
    #[inline]
    #[must_use]
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// With the history persistence path
    #[inline]
    #[must_use]
    pub fn with_history_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_path = Some(path.into());
        self
    }

    /// With the draft handling policy for cell switches
    #[inline]
    #[must_use]
    pub fn with_cell_switch_policy(mut self, policy: CellSwitchPolicy) -> Self {
        self.cell_switch_policy = policy;
        self
    }

    /// Store timeout as a [`Duration`]
    #[inline]
    #[must_use]
    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs)
    }

    /// Analysis timeout as a [`Duration`]
    #[inline]
    #[must_use]
    pub fn analysis_timeout(&self) -> Duration {
        Duration::from_secs(self.analysis_timeout_secs)
    }

    /// Visual QA timeout as a [`Duration`]
    #[inline]
    #[must_use]
    pub fn qa_timeout(&self) -> Duration {
        Duration::from_secs(self.qa_timeout_secs)
    }

    /// Asset upload timeout as a [`Duration`]
    #[inline]
    #[must_use]
    pub fn asset_timeout(&self) -> Duration {
        Duration::from_secs(self.asset_timeout_secs)
    }

    /// Test-generation timeout as a [`Duration`]
    #[inline]
    #[must_use]
    pub fn testgen_timeout(&self) -> Duration {
        Duration::from_secs(self.testgen_timeout_secs)
    }

    /// Check that settings are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let timeouts = [
            ("store_timeout_secs", self.store_timeout_secs),
            ("analysis_timeout_secs", self.analysis_timeout_secs),
            ("qa_timeout_secs", self.qa_timeout_secs),
            ("asset_timeout_secs", self.asset_timeout_secs),
            ("testgen_timeout_secs", self.testgen_timeout_secs),
        ];
        for (name, secs) in timeouts {
            if !(1..=600).contains(&secs) {
                return Err(ConfigError::InvalidTimeout { name, secs });
            }
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::InvalidCapacity);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = TaskdeckConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.history_capacity, 10);
        assert_eq!(config.store_timeout(), Duration::from_secs(30));
        assert_eq!(config.analysis_timeout(), Duration::from_secs(120));
        assert_eq!(config.qa_timeout(), Duration::from_secs(60));
        assert_eq!(config.asset_timeout(), Duration::from_secs(60));
        assert_eq!(config.testgen_timeout(), Duration::from_secs(120));
        assert_eq!(config.cell_switch_policy, CellSwitchPolicy::AbandonDraft);
    }

    #[test]
    fn builders_chain() {
        let config = TaskdeckConfig::new()
            .with_analysis_base_url("http://planning.internal")
            .with_analysis_timeout_secs(45)
            .with_history_capacity(5)
            .with_cell_switch_policy(CellSwitchPolicy::CommitDraft);

        assert_eq!(config.analysis_base_url, "http://planning.internal");
        assert_eq!(config.analysis_timeout_secs, 45);
        assert_eq!(config.history_capacity, 5);
        assert_eq!(config.cell_switch_policy, CellSwitchPolicy::CommitDraft);
    }

    #[test]
    fn partial_toml_takes_defaults() {
        let config = TaskdeckConfig::from_toml_str(
            r#"
            analysis_base_url = "http://planning.internal"
            analysis_timeout_secs = 90
            "#,
        )
        .unwrap();

        assert_eq!(config.analysis_base_url, "http://planning.internal");
        assert_eq!(config.analysis_timeout_secs, 90);
        assert_eq!(config.store_timeout_secs, 30);
        assert_eq!(config.history_capacity, 10);
    }

    #[test]
    fn cell_switch_policy_parses_from_toml() {
        let config = TaskdeckConfig::from_toml_str(
            r#"cell_switch_policy = "commit-draft""#,
        )
        .unwrap();
        assert_eq!(config.cell_switch_policy, CellSwitchPolicy::CommitDraft);
    }

    #[test]
    fn out_of_range_timeout_is_rejected() {
        let err = TaskdeckConfig::from_toml_str("analysis_timeout_secs = 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidTimeout {
                name: "analysis_timeout_secs",
                secs: 0,
            }
        ));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let config = TaskdeckConfig::new().with_history_capacity(0);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidCapacity)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = TaskdeckConfig::from_toml_str("analysis_base_url = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
