//! Core domain types
//!
//! Defines the records the rest of the workspace moves around:
//! - Typed identifiers for projects, tasks, and users
//! - [`Project`] and [`Task`] with their creation payloads
//! - [`TaskStatus`] with the loose-input coercion used at service boundaries
//! - [`DueDateValue`], the flexible due-date representation stored remotely

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique project identifier (ULID string, sortable by creation)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub String);

impl ProjectId {
    /// Generate a fresh identifier
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Ulid::new().to_string())
    }

    /// Identifier as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ProjectId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Unique task identifier (ULID string, sortable by creation)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub String);

impl TaskId {
    /// Generate a fresh identifier
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Ulid::new().to_string())
    }

    /// Identifier as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// User identifier as issued by the external identity provider
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    /// Identifier as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Task workflow status
///
/// Stored values are always one of the three variants; loose inputs from
/// imports or service boundaries go through [`TaskStatus::from_loose`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Not started
    #[default]
    #[serde(rename = "todo")]
    Todo,
    /// Actively being worked on
    #[serde(rename = "in-progress")]
    InProgress,
    /// Finished
    #[serde(rename = "done")]
    Done,
}

impl TaskStatus {
    /// Wire representation
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Done => "done",
        }
    }

    /// Coerce a loose string into a status; anything unknown becomes `Todo`
    #[inline]
    #[must_use]
    pub fn from_loose(value: &str) -> Self {
        match value.trim() {
            "in-progress" => TaskStatus::InProgress,
            "done" => TaskStatus::Done,
            _ => TaskStatus::Todo,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw due-date value as stored remotely
///
/// Imported rows carry either date text (usually `YYYY-MM-DD`) or a bare
/// number: a spreadsheet day serial or a millisecond timestamp. The
/// interpretation rules live in [`crate::date`] and the analysis adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DueDateValue {
    /// Numeric serial or millisecond timestamp
    Number(f64),
    /// Date text
    Text(String),
}

impl From<&str> for DueDateValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for DueDateValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for DueDateValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// A named container owning zero or more tasks, scoped to one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Document identifier
    pub id: ProjectId,
    /// Display name
    pub name: String,
    /// Short description
    pub description: String,
    /// Free-form labels
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Owning user
    pub owner_id: UserId,
    /// Assigned by the store at insert time
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a project; the store assigns id and timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    /// Display name
    pub name: String,
    /// Short description
    pub description: String,
    /// Free-form labels
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl NewProject {
    /// Create a new project payload
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            tags: Vec::new(),
        }
    }

    /// With tags
    #[inline]
    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

/// A unit of work belonging to exactly one project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Document identifier
    pub id: TaskId,
    /// Owning project
    pub project_id: ProjectId,
    /// Display name
    pub name: String,
    /// Assigned team member, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Flexible due date (text or numeric serial)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DueDateValue>,
    /// Size estimate, non-negative
    #[serde(default)]
    pub story_points: u32,
    /// Workflow status
    #[serde(default)]
    pub status: TaskStatus,
    /// Assigned by the store at insert time
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Derived risk score for the current size estimate
    #[inline]
    #[must_use]
    pub fn risk_score(&self) -> u8 {
        crate::risk::risk_score(Some(f64::from(self.story_points)))
    }
}

/// Payload for creating a task; the store assigns id and timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    /// Owning project
    pub project_id: ProjectId,
    /// Display name
    pub name: String,
    /// Assigned team member, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Flexible due date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DueDateValue>,
    /// Size estimate
    #[serde(default)]
    pub story_points: u32,
    /// Workflow status
    #[serde(default)]
    pub status: TaskStatus,
}

impl NewTask {
    /// Create a new task payload with defaults
    #[inline]
    #[must_use]
    pub fn new(project_id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            project_id,
            name: name.into(),
            assignee: None,
            due_date: None,
            story_points: 0,
            status: TaskStatus::Todo,
        }
    }

    /// With assignee
    #[inline]
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// With due date
    #[inline]
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<DueDateValue>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// With story points
    #[inline]
    #[must_use]
    pub fn with_story_points(mut self, points: u32) -> Self {
        self.story_points = points;
        self
    }

    /// With status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }
}
