//! Partial document updates
//!
//! Patches carry only the fields being changed. Unset fields never appear
//! on the wire and never touch the stored document. The due date is the
//! one field that can be explicitly cleared, so it nests a second level
//! of optionality: unset means keep, `Some(None)` means clear.

use serde::Serialize;

use taskdeck_core::date::format_for_backend;
use taskdeck_core::edit::{parse_points_draft, EditField};
use taskdeck_core::{DueDateValue, Project, Task, TaskStatus};

/// Partial update for a project document
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Replacement tag list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl ProjectPatch {
    /// Empty patch
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a new name
    #[inline]
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// With a new description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// With a replacement tag list
    #[inline]
    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Whether the patch changes nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.tags.is_none()
    }

    /// Apply the patch to a document in place
    pub fn apply(&self, project: &mut Project) {
        if let Some(name) = &self.name {
            project.name = name.clone();
        }
        if let Some(description) = &self.description {
            project.description = description.clone();
        }
        if let Some(tags) = &self.tags {
            project.tags = tags.clone();
        }
    }
}

/// Partial update for a task document
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New assignee; an empty string blanks the cell without clearing it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// New due date, `Some(None)` to clear
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<DueDateValue>>,
    /// New size estimate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story_points: Option<u32>,
    /// New workflow status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    /// Empty patch
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a new name
    #[inline]
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// With a new assignee
    #[inline]
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// With a new due date
    #[inline]
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<DueDateValue>) -> Self {
        self.due_date = Some(Some(due_date.into()));
        self
    }

    /// Clear the due date
    #[inline]
    #[must_use]
    pub fn clear_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    /// With a new size estimate
    #[inline]
    #[must_use]
    pub fn with_story_points(mut self, points: u32) -> Self {
        self.story_points = Some(points);
        self
    }

    /// With a new status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Whether the patch changes nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.assignee.is_none()
            && self.due_date.is_none()
            && self.story_points.is_none()
            && self.status.is_none()
    }

    /// Build the patch a committed cell draft translates to
    ///
    /// Date drafts normalize to wire form; drafts that do not read as a
    /// date clear the field, matching how an emptied date input saves.
    #[must_use]
    pub fn for_field(field: EditField, draft: &str) -> Self {
        match field {
            EditField::Name => Self::new().with_name(draft),
            EditField::Assignee => Self::new().with_assignee(draft),
            EditField::DueDate => {
                let value = DueDateValue::from(draft);
                match format_for_backend(Some(&value)) {
                    Some(wire) => Self::new().with_due_date(wire),
                    None => Self::new().clear_due_date(),
                }
            }
            EditField::StoryPoints => Self::new().with_story_points(parse_points_draft(draft)),
            EditField::Status => Self::new().with_status(TaskStatus::from_loose(draft)),
        }
    }

    /// Apply the patch to a document in place
    pub fn apply(&self, task: &mut Task) {
        if let Some(name) = &self.name {
            task.name = name.clone();
        }
        if let Some(assignee) = &self.assignee {
            task.assignee = Some(assignee.clone());
        }
        if let Some(due_date) = &self.due_date {
            task.due_date = due_date.clone();
        }
        if let Some(points) = self.story_points {
            task.story_points = points;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
    }
}
