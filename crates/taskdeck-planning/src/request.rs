//! Analysis request normalization
//!
//! The analysis service is strict about its input; stored tasks are not.
//! [`normalize`] turns loose task records into the exact shape the
//! service validates, attaching the team roster and sprint constants
//! from [`PlanningConfig`].
//!
//! Due-date coercion, in order:
//! 1. Text with a `YYYY-MM-DD` prefix passes through truncated to the
//!    prefix, unvalidated, so imported data round-trips bit for bit
//! 2. Numbers below 100 000 are spreadsheet day serials from 1899-12-30
//! 3. Numbers at or above 100 000 are millisecond timestamps
//! 4. Anything else gets one generic parse attempt; unparseable is null

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use taskdeck_core::date::{iso_day_prefix, serial_to_date, timestamp_millis_to_date, TIMESTAMP_CUTOFF};
use taskdeck_core::{DueDateValue, Task, TaskStatus};

use crate::config::{PlanningConfig, TeamMember};

/// A task as loosely as it may arrive from storage or an import
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawTask {
    /// Document id
    pub id: String,
    /// Display name, possibly blank
    #[serde(default)]
    pub name: Option<String>,
    /// Assignee, possibly blank
    #[serde(default)]
    pub assignee: Option<String>,
    /// Due date in any stored form
    #[serde(default)]
    pub due_date: Option<DueDateValue>,
    /// Size estimate, possibly fractional or out of range
    #[serde(default)]
    pub story_points: Option<f64>,
    /// Status text, possibly unknown
    #[serde(default)]
    pub status: Option<String>,
    /// Upstream task ids
    #[serde(default)]
    pub dependencies: Option<Vec<String>>,
}

impl From<&Task> for RawTask {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.to_string(),
            name: Some(task.name.clone()),
            assignee: task.assignee.clone(),
            due_date: task.due_date.clone(),
            story_points: Some(f64::from(task.story_points)),
            status: Some(task.status.as_str().to_string()),
            dependencies: None,
        }
    }
}

/// One normalized task, exactly as the service expects it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisTask {
    /// Stringified id
    pub id: String,
    /// Never empty; blank names become `Untitled Task`
    pub name: String,
    /// Null when unassigned or blank
    pub assignee: Option<String>,
    /// `YYYY-MM-DD`, or null when absent or unreadable
    pub due_date: Option<String>,
    /// Clamped to 0..=100
    pub story_points: u32,
    /// One of the three status values
    pub status: String,
    /// Never null; defaults to empty
    pub dependencies: Vec<String>,
}

/// The full analysis request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Normalized tasks
    pub tasks: Vec<AnalysisTask>,
    /// Team capacity roster
    pub team: Vec<TeamMember>,
    /// Sprint length in days
    pub sprint_length_days: u32,
    /// Completed points per sprint, oldest first
    pub velocity_history: Vec<u32>,
}

/// Build the analysis request for a set of loose tasks
#[must_use]
pub fn normalize(tasks: &[RawTask], config: &PlanningConfig) -> AnalysisRequest {
    AnalysisRequest {
        tasks: tasks.iter().map(normalize_task).collect(),
        team: config.team.clone(),
        sprint_length_days: config.sprint_length_days,
        velocity_history: config.velocity_history.clone(),
    }
}

fn normalize_task(raw: &RawTask) -> AnalysisTask {
    let name = match raw.name.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => "Untitled Task".to_string(),
    };
    let assignee = raw
        .assignee
        .as_deref()
        .filter(|a| !a.is_empty())
        .map(str::to_string);

    AnalysisTask {
        id: raw.id.clone(),
        name,
        assignee,
        due_date: coerce_due_date(raw.due_date.as_ref()),
        story_points: coerce_points(raw.story_points),
        status: coerce_status(raw.status.as_deref()),
        dependencies: raw.dependencies.clone().unwrap_or_default(),
    }
}

/// Coerce a stored due date into the service's date field
#[must_use]
pub fn coerce_due_date(value: Option<&DueDateValue>) -> Option<String> {
    match value? {
        DueDateValue::Text(text) => {
            if let Some(prefix) = iso_day_prefix(text) {
                // raw passthrough keeps imported values bit-compatible
                return Some(prefix.to_string());
            }
            DateTime::parse_from_rfc2822(text)
                .ok()
                .map(|dt| dt.date_naive().format("%Y-%m-%d").to_string())
        }
        DueDateValue::Number(n) => {
            let date = if *n >= TIMESTAMP_CUTOFF {
                timestamp_millis_to_date(*n)
            } else {
                serial_to_date(*n)
            };
            date.map(|d| d.format("%Y-%m-%d").to_string())
        }
    }
}

/// Clamp a loose points value into the service's accepted range
#[must_use]
pub fn coerce_points(points: Option<f64>) -> u32 {
    let value = points.unwrap_or(0.0);
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    value.floor().min(100.0) as u32
}

fn coerce_status(status: Option<&str>) -> String {
    TaskStatus::from_loose(status.unwrap_or_default())
        .as_str()
        .to_string()
}
