//! Inline cell-edit state machine
//!
//! A table surface edits one cell at a time. [`EditSession`] tracks the
//! active cell and its draft text, and resolves what happens when focus
//! moves to a different cell before the draft is saved:
//! - [`CellSwitchPolicy::AbandonDraft`] drops the draft silently
//! - [`CellSwitchPolicy::CommitDraft`] hands the draft back so the caller
//!   saves it before the new edit starts
//!
//! The session never touches storage. Commit and cancel return the draft
//! and leave persistence to the caller.

use serde::{Deserialize, Serialize};

use crate::date::format_for_input;
use crate::types::{Task, TaskId};

/// Editable columns of the task table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditField {
    /// Task name
    Name,
    /// Assigned team member
    Assignee,
    /// Due date
    DueDate,
    /// Size estimate
    StoryPoints,
    /// Workflow status
    Status,
}

impl EditField {
    /// Wire name of the field
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            EditField::Name => "name",
            EditField::Assignee => "assignee",
            EditField::DueDate => "dueDate",
            EditField::StoryPoints => "storyPoints",
            EditField::Status => "status",
        }
    }

    /// Seed draft text for this field from a task's current value
    #[must_use]
    pub fn input_value(&self, task: &Task) -> String {
        match self {
            EditField::Name => task.name.clone(),
            EditField::Assignee => task.assignee.clone().unwrap_or_default(),
            EditField::DueDate => format_for_input(task.due_date.as_ref()),
            EditField::StoryPoints => task.story_points.to_string(),
            EditField::Status => task.status.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for EditField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One cell of the task table
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellRef {
    /// Row
    pub task_id: TaskId,
    /// Column
    pub field: EditField,
}

impl CellRef {
    /// Create a cell reference
    #[inline]
    #[must_use]
    pub fn new(task_id: TaskId, field: EditField) -> Self {
        Self { task_id, field }
    }
}

/// What to do with an unsaved draft when focus moves to another cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CellSwitchPolicy {
    /// Drop the draft without saving
    #[default]
    AbandonDraft,
    /// Save the draft before starting the new edit
    CommitDraft,
}

/// Session state: at most one cell is ever being edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditState {
    /// No active edit
    Idle,
    /// One cell has an unsaved draft
    Editing {
        /// The active cell
        cell: CellRef,
        /// Current draft text
        draft: String,
    },
}

/// A draft ready to be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    /// The cell the draft belongs to
    pub cell: CellRef,
    /// Draft text at the time the edit ended
    pub draft: String,
}

/// Outcome of starting an edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellSwitch {
    /// No prior draft was affected
    Clean,
    /// A different cell's draft was dropped without saving
    Abandoned(PendingEdit),
    /// A different cell's draft must be saved by the caller
    NeedsCommit(PendingEdit),
}

/// Tracks the single active cell edit for one table surface
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    state: Option<(CellRef, String)>,
    policy: CellSwitchPolicy,
}

impl EditSession {
    /// Create a session with the given switch policy
    #[inline]
    #[must_use]
    pub fn new(policy: CellSwitchPolicy) -> Self {
        Self {
            state: None,
            policy,
        }
    }

    /// Configured switch policy
    #[inline]
    #[must_use]
    pub fn policy(&self) -> CellSwitchPolicy {
        self.policy
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> EditState {
        match &self.state {
            None => EditState::Idle,
            Some((cell, draft)) => EditState::Editing {
                cell: cell.clone(),
                draft: draft.clone(),
            },
        }
    }

    /// Whether an edit is active
    #[inline]
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.state.is_some()
    }

    /// The cell being edited, if any
    #[must_use]
    pub fn editing_cell(&self) -> Option<&CellRef> {
        self.state.as_ref().map(|(cell, _)| cell)
    }

    /// The current draft text, if any
    #[must_use]
    pub fn draft(&self) -> Option<&str> {
        self.state.as_ref().map(|(_, draft)| draft.as_str())
    }

    /// Start editing a cell with the given seed text
    ///
    /// Starting the cell that is already active keeps its draft untouched.
    /// Starting a different cell resolves the old draft per the session
    /// policy and reports what happened.
    pub fn begin(&mut self, cell: CellRef, initial_draft: impl Into<String>) -> CellSwitch {
        if let Some((active, _)) = &self.state {
            if *active == cell {
                return CellSwitch::Clean;
            }
        }

        let previous = self.state.take();
        self.state = Some((cell, initial_draft.into()));

        match previous {
            None => CellSwitch::Clean,
            Some((cell, draft)) => {
                let pending = PendingEdit { cell, draft };
                match self.policy {
                    CellSwitchPolicy::AbandonDraft => CellSwitch::Abandoned(pending),
                    CellSwitchPolicy::CommitDraft => CellSwitch::NeedsCommit(pending),
                }
            }
        }
    }

    /// Replace the draft text; returns false when no edit is active
    pub fn set_draft(&mut self, draft: impl Into<String>) -> bool {
        match &mut self.state {
            Some((_, current)) => {
                *current = draft.into();
                true
            }
            None => false,
        }
    }

    /// End the edit and hand the draft to the caller for persistence
    pub fn commit(&mut self) -> Option<PendingEdit> {
        self.state
            .take()
            .map(|(cell, draft)| PendingEdit { cell, draft })
    }

    /// End the edit, discarding the draft; returns what was discarded
    pub fn cancel(&mut self) -> Option<PendingEdit> {
        self.state
            .take()
            .map(|(cell, draft)| PendingEdit { cell, draft })
    }
}

/// Parse a story-points draft; anything unusable becomes zero
///
/// Fractional input floors, negatives clamp to zero.
#[must_use]
pub fn parse_points_draft(draft: &str) -> u32 {
    let parsed = draft.trim().parse::<f64>().unwrap_or(0.0);
    // saturating float cast: NaN and negatives land on zero
    parsed.floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DueDateValue, ProjectId, TaskStatus};
    use chrono::{DateTime, Utc};

    fn cell(task: &str, field: EditField) -> CellRef {
        CellRef::new(TaskId::from(task), field)
    }

    fn sample_task() -> Task {
        Task {
            id: TaskId::from("t1"),
            project_id: ProjectId::from("p1"),
            name: "Checkout flow".to_string(),
            assignee: Some("Sarah Johnson".to_string()),
            due_date: Some(DueDateValue::from("2024-03-15")),
            story_points: 8,
            status: TaskStatus::InProgress,
            created_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    #[test]
    fn begin_from_idle_is_clean() {
        let mut session = EditSession::default();
        let outcome = session.begin(cell("t1", EditField::Name), "Checkout flow");

        assert_eq!(outcome, CellSwitch::Clean);
        assert!(session.is_editing());
        assert_eq!(session.draft(), Some("Checkout flow"));
    }

    #[test]
    fn begin_same_cell_keeps_draft() {
        let mut session = EditSession::default();
        session.begin(cell("t1", EditField::Name), "Checkout flow");
        session.set_draft("Checkout flow v2");

        let outcome = session.begin(cell("t1", EditField::Name), "Checkout flow");
        assert_eq!(outcome, CellSwitch::Clean);
        assert_eq!(session.draft(), Some("Checkout flow v2"));
    }

    #[test]
    fn switching_cells_abandons_by_default() {
        let mut session = EditSession::default();
        session.begin(cell("t1", EditField::Name), "old name");
        session.set_draft("half-typed");

        let outcome = session.begin(cell("t2", EditField::Assignee), "");
        assert_eq!(
            outcome,
            CellSwitch::Abandoned(PendingEdit {
                cell: cell("t1", EditField::Name),
                draft: "half-typed".to_string(),
            })
        );
        assert_eq!(session.editing_cell(), Some(&cell("t2", EditField::Assignee)));
    }

    #[test]
    fn switching_fields_on_same_row_still_switches() {
        let mut session = EditSession::default();
        session.begin(cell("t1", EditField::Name), "old name");

        let outcome = session.begin(cell("t1", EditField::StoryPoints), "8");
        assert!(matches!(outcome, CellSwitch::Abandoned(_)));
    }

    #[test]
    fn commit_draft_policy_hands_back_the_pending_edit() {
        let mut session = EditSession::new(CellSwitchPolicy::CommitDraft);
        session.begin(cell("t1", EditField::Name), "old name");
        session.set_draft("new name");

        let outcome = session.begin(cell("t2", EditField::Name), "other");
        assert_eq!(
            outcome,
            CellSwitch::NeedsCommit(PendingEdit {
                cell: cell("t1", EditField::Name),
                draft: "new name".to_string(),
            })
        );
    }

    #[test]
    fn commit_returns_draft_and_goes_idle() {
        let mut session = EditSession::default();
        session.begin(cell("t1", EditField::StoryPoints), "8");
        session.set_draft("13");

        let pending = session.commit().unwrap();
        assert_eq!(pending.draft, "13");
        assert!(!session.is_editing());
        assert_eq!(session.commit(), None);
    }

    #[test]
    fn cancel_discards_without_committing() {
        let mut session = EditSession::default();
        session.begin(cell("t1", EditField::Name), "seed");

        let discarded = session.cancel().unwrap();
        assert_eq!(discarded.draft, "seed");
        assert!(!session.is_editing());
    }

    #[test]
    fn set_draft_requires_an_active_edit() {
        let mut session = EditSession::default();
        assert!(!session.set_draft("orphan"));
    }

    #[test]
    fn input_value_seeds_each_field() {
        let task = sample_task();
        assert_eq!(EditField::Name.input_value(&task), "Checkout flow");
        assert_eq!(EditField::Assignee.input_value(&task), "Sarah Johnson");
        assert_eq!(EditField::DueDate.input_value(&task), "2024-03-15");
        assert_eq!(EditField::StoryPoints.input_value(&task), "8");
        assert_eq!(EditField::Status.input_value(&task), "in-progress");
    }

    #[test]
    fn input_value_handles_missing_optionals() {
        let mut task = sample_task();
        task.assignee = None;
        task.due_date = None;

        assert_eq!(EditField::Assignee.input_value(&task), "");
        assert_eq!(EditField::DueDate.input_value(&task), "");
    }

    #[test]
    fn points_draft_parsing_is_total() {
        assert_eq!(parse_points_draft("5"), 5);
        assert_eq!(parse_points_draft("5.9"), 5);
        assert_eq!(parse_points_draft(" 13 "), 13);
        assert_eq!(parse_points_draft("-3"), 0);
        assert_eq!(parse_points_draft("abc"), 0);
        assert_eq!(parse_points_draft(""), 0);
    }
}
