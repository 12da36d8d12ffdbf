//! The document store contract
//!
//! Two collections, `projects` and `tasks`, with create, filtered list,
//! get, patch, and delete. Semantics every backend honors:
//! - Create assigns the id and `created_at`, returning the stored document
//! - Get returns `Ok(None)` for absent documents
//! - Patch on an absent document is [`StoreError::NotFound`]
//! - Delete is idempotent; deleting an absent document succeeds
//! - Lists sort by creation time, then id
//! - No versioning or locking: concurrent writers are last-write-wins

use async_trait::async_trait;

use taskdeck_core::{NewProject, NewTask, Project, ProjectId, Task, TaskId, UserId};

use crate::error::StoreError;
use crate::patch::{ProjectPatch, TaskPatch};

/// Remote document storage for projects and tasks
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a project owned by `owner`, returning the stored document
    async fn create_project(
        &self,
        new: NewProject,
        owner: &UserId,
    ) -> Result<Project, StoreError>;

    /// Projects owned by one user
    async fn projects_for_owner(&self, owner: &UserId) -> Result<Vec<Project>, StoreError>;

    /// Fetch one project
    async fn project(&self, id: &ProjectId) -> Result<Option<Project>, StoreError>;

    /// Patch a project, returning the updated document
    async fn update_project(
        &self,
        id: &ProjectId,
        patch: ProjectPatch,
    ) -> Result<Project, StoreError>;

    /// Delete a project; absent documents succeed
    ///
    /// Tasks under the project are not touched. Deleting a project leaves
    /// its tasks orphaned in the `tasks` collection.
    async fn delete_project(&self, id: &ProjectId) -> Result<(), StoreError>;

    /// Insert a task, returning the stored document
    async fn create_task(&self, new: NewTask) -> Result<Task, StoreError>;

    /// Tasks belonging to one project
    async fn tasks_for_project(&self, project: &ProjectId) -> Result<Vec<Task>, StoreError>;

    /// Fetch one task
    async fn task(&self, id: &TaskId) -> Result<Option<Task>, StoreError>;

    /// Patch a task, returning the updated document
    async fn update_task(&self, id: &TaskId, patch: TaskPatch) -> Result<Task, StoreError>;

    /// Delete a task; absent documents succeed
    async fn delete_task(&self, id: &TaskId) -> Result<(), StoreError>;
}
