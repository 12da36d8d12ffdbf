//! In-memory store backend
//!
//! Backs tests and offline work with the same semantics as the REST
//! backend. Documents live in concurrent maps keyed by id; list calls
//! filter and sort on demand.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use taskdeck_core::{NewProject, NewTask, Project, ProjectId, Task, TaskId, UserId};

use crate::error::StoreError;
use crate::patch::{ProjectPatch, TaskPatch};
use crate::store::DocumentStore;

/// Concurrent in-memory document store
#[derive(Debug, Default)]
pub struct MemoryStore {
    projects: DashMap<ProjectId, Project>,
    tasks: DashMap<TaskId, Task>,
}

impl MemoryStore {
    /// Create an empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored projects
    #[inline]
    #[must_use]
    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    /// Number of stored tasks
    #[inline]
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create_project(
        &self,
        new: NewProject,
        owner: &UserId,
    ) -> Result<Project, StoreError> {
        let project = Project {
            id: ProjectId::generate(),
            name: new.name,
            description: new.description,
            tags: new.tags,
            owner_id: owner.clone(),
            created_at: Utc::now(),
        };
        self.projects.insert(project.id.clone(), project.clone());
        Ok(project)
    }

    async fn projects_for_owner(&self, owner: &UserId) -> Result<Vec<Project>, StoreError> {
        let mut projects: Vec<Project> = self
            .projects
            .iter()
            .filter(|entry| entry.owner_id == *owner)
            .map(|entry| entry.value().clone())
            .collect();
        projects.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(projects)
    }

    async fn project(&self, id: &ProjectId) -> Result<Option<Project>, StoreError> {
        Ok(self.projects.get(id).map(|entry| entry.value().clone()))
    }

    async fn update_project(
        &self,
        id: &ProjectId,
        patch: ProjectPatch,
    ) -> Result<Project, StoreError> {
        let mut entry = self
            .projects
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("projects/{id}")))?;
        patch.apply(entry.value_mut());
        Ok(entry.value().clone())
    }

    async fn delete_project(&self, id: &ProjectId) -> Result<(), StoreError> {
        self.projects.remove(id);
        Ok(())
    }

    async fn create_task(&self, new: NewTask) -> Result<Task, StoreError> {
        let task = Task {
            id: TaskId::generate(),
            project_id: new.project_id,
            name: new.name,
            assignee: new.assignee,
            due_date: new.due_date,
            story_points: new.story_points,
            status: new.status,
            created_at: Utc::now(),
        };
        self.tasks.insert(task.id.clone(), task.clone());
        Ok(task)
    }

    async fn tasks_for_project(&self, project: &ProjectId) -> Result<Vec<Task>, StoreError> {
        let mut tasks: Vec<Task> = self
            .tasks
            .iter()
            .filter(|entry| entry.project_id == *project)
            .map(|entry| entry.value().clone())
            .collect();
        tasks.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(tasks)
    }

    async fn task(&self, id: &TaskId) -> Result<Option<Task>, StoreError> {
        Ok(self.tasks.get(id).map(|entry| entry.value().clone()))
    }

    async fn update_task(&self, id: &TaskId, patch: TaskPatch) -> Result<Task, StoreError> {
        let mut entry = self
            .tasks
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("tasks/{id}")))?;
        patch.apply(entry.value_mut());
        Ok(entry.value().clone())
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), StoreError> {
        self.tasks.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskdeck_core::{DueDateValue, TaskStatus};

    fn owner() -> UserId {
        UserId::from("u1")
    }

    #[tokio::test]
    async fn create_assigns_id_and_timestamp() {
        let store = MemoryStore::new();
        let project = store
            .create_project(NewProject::new("Web Redesign", "Marketing site"), &owner())
            .await
            .unwrap();

        assert!(!project.id.as_str().is_empty());
        assert_eq!(project.owner_id, owner());

        let fetched = store.project(&project.id).await.unwrap();
        assert_eq!(fetched, Some(project));
    }

    #[tokio::test]
    async fn lists_filter_by_owner_in_creation_order() {
        let store = MemoryStore::new();
        let first = store
            .create_project(NewProject::new("First", ""), &owner())
            .await
            .unwrap();
        let second = store
            .create_project(NewProject::new("Second", ""), &owner())
            .await
            .unwrap();
        store
            .create_project(NewProject::new("Other", ""), &UserId::from("u2"))
            .await
            .unwrap();

        let mine = store.projects_for_owner(&owner()).await.unwrap();
        assert_eq!(
            mine.iter().map(|p| &p.id).collect::<Vec<_>>(),
            vec![&first.id, &second.id]
        );
    }

    #[tokio::test]
    async fn get_missing_is_none_not_an_error() {
        let store = MemoryStore::new();
        assert_eq!(store.project(&ProjectId::from("ghost")).await.unwrap(), None);
        assert_eq!(store.task(&TaskId::from("ghost")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn patch_missing_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update_task(&TaskId::from("ghost"), TaskPatch::new().with_story_points(3))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn patch_updates_only_set_fields() {
        let store = MemoryStore::new();
        let task = store
            .create_task(
                NewTask::new(ProjectId::from("p1"), "Checkout flow")
                    .with_assignee("Sarah Johnson")
                    .with_story_points(5),
            )
            .await
            .unwrap();

        let updated = store
            .update_task(
                &task.id,
                TaskPatch::new().with_status(TaskStatus::InProgress),
            )
            .await
            .unwrap();

        assert_eq!(updated.status, TaskStatus::InProgress);
        assert_eq!(updated.assignee.as_deref(), Some("Sarah Johnson"));
        assert_eq!(updated.story_points, 5);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryStore::new();
        let task = store
            .create_task(NewTask::new(ProjectId::from("p1"), "Checkout flow"))
            .await
            .unwrap();

        store.delete_task(&task.id).await.unwrap();
        store.delete_task(&task.id).await.unwrap();
        assert_eq!(store.task_count(), 0);
    }

    #[tokio::test]
    async fn deleting_a_project_leaves_its_tasks() {
        let store = MemoryStore::new();
        let project = store
            .create_project(NewProject::new("Web Redesign", ""), &owner())
            .await
            .unwrap();
        store
            .create_task(NewTask::new(project.id.clone(), "Checkout flow"))
            .await
            .unwrap();

        store.delete_project(&project.id).await.unwrap();

        assert_eq!(store.project_count(), 0);
        assert_eq!(store.task_count(), 1);
        let orphans = store.tasks_for_project(&project.id).await.unwrap();
        assert_eq!(orphans.len(), 1);
    }

    #[tokio::test]
    async fn due_dates_keep_their_stored_form() {
        let store = MemoryStore::new();
        let task = store
            .create_task(
                NewTask::new(ProjectId::from("p1"), "Imported row")
                    .with_due_date(DueDateValue::Number(45000.0)),
            )
            .await
            .unwrap();

        let fetched = store.task(&task.id).await.unwrap().unwrap();
        assert_eq!(fetched.due_date, Some(DueDateValue::Number(45000.0)));
    }
}
