//! REST store backend
//!
//! Speaks a plain JSON protocol over two collection endpoints:
//! `/projects` (filtered by `ownerId`) and `/tasks` (filtered by
//! `projectId`). Create POSTs the new document, patch PATCHes the set
//! fields, and both return the stored document. A 404 on get maps to
//! `Ok(None)`; a 404 on delete counts as success.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::debug;

use taskdeck_core::{NewProject, NewTask, Project, ProjectId, Task, TaskId, UserId};

use crate::error::StoreError;
use crate::patch::{ProjectPatch, TaskPatch};
use crate::store::DocumentStore;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateProjectBody<'a> {
    #[serde(flatten)]
    new: &'a NewProject,
    owner_id: &'a UserId,
}

/// Document store backed by an HTTP service
#[derive(Debug, Clone)]
pub struct RestDocumentStore {
    client: reqwest::Client,
    base_url: String,
}

impl RestDocumentStore {
    /// Create a store client with its own connection pool and timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a store client from an existing [`reqwest::Client`]
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url }
    }

    /// Base URL this client talks to
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Read the body of a success response, or map the failure
    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, StoreError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(StoreError::Service {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Like [`Self::decode`], but 404 becomes `Ok(None)`
    async fn decode_optional<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<Option<T>, StoreError> {
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::decode(response).await.map(Some)
    }

    /// Map a patch response; 404 is the document-missing case
    async fn decode_patched<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        document: String,
    ) -> Result<T, StoreError> {
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(document));
        }
        Self::decode(response).await
    }

    /// Check a delete response; absent documents succeed
    async fn check_deleted(response: reqwest::Response) -> Result<(), StoreError> {
        let status = response.status();
        if status.is_success() || status == StatusCode::NOT_FOUND {
            return Ok(());
        }
        Err(StoreError::Service {
            status: status.as_u16(),
            message: response.text().await?,
        })
    }
}

#[async_trait]
impl DocumentStore for RestDocumentStore {
    async fn create_project(
        &self,
        new: NewProject,
        owner: &UserId,
    ) -> Result<Project, StoreError> {
        debug!(owner = %owner, name = %new.name, "creating project");
        let response = self
            .client
            .post(self.url("/projects"))
            .json(&CreateProjectBody { new: &new, owner_id: owner })
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn projects_for_owner(&self, owner: &UserId) -> Result<Vec<Project>, StoreError> {
        let response = self
            .client
            .get(self.url("/projects"))
            .query(&[("ownerId", owner.as_str())])
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn project(&self, id: &ProjectId) -> Result<Option<Project>, StoreError> {
        let response = self
            .client
            .get(self.url(&format!("/projects/{id}")))
            .send()
            .await?;
        Self::decode_optional(response).await
    }

    async fn update_project(
        &self,
        id: &ProjectId,
        patch: ProjectPatch,
    ) -> Result<Project, StoreError> {
        debug!(project = %id, "patching project");
        let response = self
            .client
            .patch(self.url(&format!("/projects/{id}")))
            .json(&patch)
            .send()
            .await?;
        Self::decode_patched(response, format!("projects/{id}")).await
    }

    async fn delete_project(&self, id: &ProjectId) -> Result<(), StoreError> {
        debug!(project = %id, "deleting project");
        let response = self
            .client
            .delete(self.url(&format!("/projects/{id}")))
            .send()
            .await?;
        Self::check_deleted(response).await
    }

    async fn create_task(&self, new: NewTask) -> Result<Task, StoreError> {
        debug!(project = %new.project_id, name = %new.name, "creating task");
        let response = self
            .client
            .post(self.url("/tasks"))
            .json(&new)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn tasks_for_project(&self, project: &ProjectId) -> Result<Vec<Task>, StoreError> {
        let response = self
            .client
            .get(self.url("/tasks"))
            .query(&[("projectId", project.as_str())])
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn task(&self, id: &TaskId) -> Result<Option<Task>, StoreError> {
        let response = self
            .client
            .get(self.url(&format!("/tasks/{id}")))
            .send()
            .await?;
        Self::decode_optional(response).await
    }

    async fn update_task(&self, id: &TaskId, patch: TaskPatch) -> Result<Task, StoreError> {
        debug!(task = %id, "patching task");
        let response = self
            .client
            .patch(self.url(&format!("/tasks/{id}")))
            .json(&patch)
            .send()
            .await?;
        Self::decode_patched(response, format!("tasks/{id}")).await
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), StoreError> {
        debug!(task = %id, "deleting task");
        let response = self
            .client
            .delete(self.url(&format!("/tasks/{id}")))
            .send()
            .await?;
        Self::check_deleted(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() {
        let client = reqwest::Client::new();
        let store = RestDocumentStore::with_client(client, "http://store.local///");
        assert_eq!(store.base_url(), "http://store.local");
        assert_eq!(store.url("/tasks"), "http://store.local/tasks");
    }
}
