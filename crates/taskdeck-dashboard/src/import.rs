//! Bulk task import
//!
//! Rows arrive already parsed; file handling is the caller's concern.
//! Tasks are created one at a time in row order. The first failure stops
//! the batch and surfaces one aggregate error naming the failed row;
//! rows created before the failure stay created.
//!
//! Row fields take the same defaults used at the analysis boundary:
//! blank names become `Untitled Task`, loose statuses become `todo`,
//! points are clamped to 0..=100.

use serde::Deserialize;
use tracing::{debug, info};

use taskdeck_core::{DueDateValue, NewTask, ProjectId, TaskStatus};
use taskdeck_planning::request::coerce_points;
use taskdeck_store::{DocumentStore, StoreError};

/// A parsed import row, every field optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ImportRow {
    /// Task name, possibly blank
    #[serde(default)]
    pub name: Option<String>,
    /// Assignee, possibly blank
    #[serde(default)]
    pub assignee: Option<String>,
    /// Due date in any accepted form
    #[serde(default)]
    pub due_date: Option<DueDateValue>,
    /// Size estimate, possibly fractional or out of range
    #[serde(default)]
    pub story_points: Option<f64>,
    /// Status text, possibly unknown
    #[serde(default)]
    pub status: Option<String>,
}

impl ImportRow {
    /// Row with just a name set
    #[inline]
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// A batch that stopped partway through
#[derive(Debug, thiserror::Error)]
#[error("import stopped at row {row} ('{name}') after creating {imported} tasks: {source}")]
pub struct ImportError {
    /// One-based index of the failed row
    pub row: usize,
    /// Name the failed row would have imported under
    pub name: String,
    /// Rows created before the failure; these are not rolled back
    pub imported: usize,
    /// The store failure that stopped the batch
    #[source]
    pub source: StoreError,
}

/// Map one row to a create payload, applying the boundary defaults
#[must_use]
pub fn task_for_row(project_id: &ProjectId, row: &ImportRow) -> NewTask {
    let name = row
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or("Untitled Task");

    let mut task = NewTask::new(project_id.clone(), name)
        .with_story_points(coerce_points(row.story_points))
        .with_status(TaskStatus::from_loose(row.status.as_deref().unwrap_or_default()));

    if let Some(assignee) = row
        .assignee
        .as_deref()
        .map(str::trim)
        .filter(|assignee| !assignee.is_empty())
    {
        task = task.with_assignee(assignee);
    }
    if let Some(due) = row.due_date.clone() {
        task = task.with_due_date(due);
    }
    task
}

/// Create one task per row, in order, stopping at the first failure
pub async fn import_tasks(
    store: &dyn DocumentStore,
    project_id: &ProjectId,
    rows: &[ImportRow],
) -> Result<usize, ImportError> {
    for (index, row) in rows.iter().enumerate() {
        let task = task_for_row(project_id, row);
        let name = task.name.clone();
        debug!(row = index + 1, %name, "importing row");
        if let Err(source) = store.create_task(task).await {
            return Err(ImportError {
                row: index + 1,
                name,
                imported: index,
                source,
            });
        }
    }
    info!(project_id = %project_id, rows = rows.len(), "import finished");
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use taskdeck_store::MemoryStore;
    use taskdeck_test_utils::FlakyStore;

    use super::*;

    fn rows() -> Vec<ImportRow> {
        vec![
            ImportRow {
                name: Some("Design review".to_string()),
                assignee: Some("Sarah Johnson".to_string()),
                story_points: Some(5.0),
                status: Some("in-progress".to_string()),
                ..ImportRow::default()
            },
            ImportRow::named("Fix login redirect"),
            ImportRow {
                name: Some("   ".to_string()),
                story_points: Some(250.0),
                status: Some("blocked".to_string()),
                ..ImportRow::default()
            },
        ]
    }

    #[test]
    fn rows_map_with_the_boundary_defaults() {
        let project = ProjectId::from("p1");
        let task = task_for_row(&project, &rows()[2]);

        assert_eq!(task.name, "Untitled Task");
        assert_eq!(task.assignee, None);
        assert_eq!(task.story_points, 100);
        assert_eq!(task.status, TaskStatus::Todo);
    }

    #[tokio::test]
    async fn a_clean_batch_imports_every_row() {
        let store = MemoryStore::new();
        let project = ProjectId::from("p1");

        let imported = import_tasks(&store, &project, &rows()).await.unwrap();

        assert_eq!(imported, 3);
        assert_eq!(store.task_count(), 3);
        let names: Vec<String> = store
            .tasks_for_project(&project)
            .await
            .unwrap()
            .into_iter()
            .map(|task| task.name)
            .collect();
        assert_eq!(names, vec!["Design review", "Fix login redirect", "Untitled Task"]);
    }

    #[tokio::test]
    async fn a_mid_batch_failure_keeps_earlier_rows_and_stops() {
        let store = FlakyStore::failing_create_at(MemoryStore::new(), 2);
        let project = ProjectId::from("p1");

        let err = import_tasks(&store, &project, &rows()).await.unwrap_err();

        assert_eq!(err.row, 2);
        assert_eq!(err.name, "Fix login redirect");
        assert_eq!(err.imported, 1);
        // the third row is never attempted
        assert!(err.source.to_string().contains("injected failure"));
        assert_eq!(store.create_calls(), 2);
        assert_eq!(store.tasks_for_project(&project).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn an_empty_batch_is_a_no_op() {
        let store = MemoryStore::new();
        let imported = import_tasks(&store, &ProjectId::from("p1"), &[])
            .await
            .unwrap();
        assert_eq!(imported, 0);
        assert_eq!(store.task_count(), 0);
    }
}
