//! Comparison report schema
//!
//! The UI comparison endpoint returns a verdict plus a change list. The
//! other QA endpoints return free-form reports and stay untyped. Every
//! field here is optional; the service omits what it did not detect.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use taskdeck_core::ProjectId;

/// Comparison verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonStatus {
    /// No change beyond tolerance
    #[serde(rename = "PASS")]
    Pass,
    /// At least one change beyond tolerance
    #[serde(rename = "FAIL")]
    Fail,
}

/// How much a detected change matters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeSeverity {
    /// Breaks the layout
    High,
    /// Noticeable but usable
    Medium,
    /// Cosmetic
    Low,
}

/// One detected difference between the two screenshots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectedChange {
    /// Which element moved or changed
    #[serde(default)]
    pub element: Option<String>,
    /// Kind of change the service saw
    #[serde(default, rename = "type")]
    pub change_type: Option<String>,
    /// Severity grade
    #[serde(default)]
    pub severity: Option<ChangeSeverity>,
    /// Pixel shift description
    #[serde(default)]
    pub shift: Option<String>,
}

/// Structured diff between a baseline and a comparison screenshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Overall verdict
    #[serde(default)]
    pub status: Option<ComparisonStatus>,
    /// Detected differences
    #[serde(default)]
    pub changes: Vec<DetectedChange>,
}

impl ComparisonReport {
    /// Whether the comparison failed outright
    #[inline]
    #[must_use]
    pub fn failed(&self) -> bool {
        matches!(self.status, Some(ComparisonStatus::Fail))
    }

    /// Number of high-severity changes
    #[must_use]
    pub fn high_severity_count(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| c.severity == Some(ChangeSeverity::High))
            .count()
    }
}

/// One finished comparison run, as kept in the local history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRecord {
    /// Project the screenshots belong to
    pub project_id: ProjectId,
    /// When the comparison ran
    pub run_at: DateTime<Utc>,
    /// Tolerance used, 0..=20
    pub tolerance: u8,
    /// The service's report
    pub report: ComparisonReport,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reports_parse_from_service_json() {
        let report: ComparisonReport = serde_json::from_str(
            r#"{
                "status": "FAIL",
                "changes": [
                    { "element": "checkout button", "type": "position",
                      "severity": "High", "shift": "24px down" },
                    { "element": "nav logo", "severity": "Low" }
                ]
            }"#,
        )
        .unwrap();

        assert!(report.failed());
        assert_eq!(report.changes.len(), 2);
        assert_eq!(report.high_severity_count(), 1);
        assert_eq!(report.changes[0].change_type.as_deref(), Some("position"));
        assert_eq!(report.changes[1].shift, None);
    }

    #[test]
    fn empty_reports_default_cleanly() {
        let report: ComparisonReport = serde_json::from_str("{}").unwrap();
        assert!(!report.failed());
        assert!(report.changes.is_empty());
    }
}
