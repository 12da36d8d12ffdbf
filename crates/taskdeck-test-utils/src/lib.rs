//! Testing utilities for the Taskdeck workspace
//!
//! Shared fixtures, a scripted identity provider, and a store wrapper that
//! injects failures at chosen call indexes.

#![allow(missing_docs)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Once;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

use taskdeck_core::identity::{AuthUser, IdentityError, IdentityProvider};
use taskdeck_core::types::{DueDateValue, Project, ProjectId, Task, TaskId, TaskStatus, UserId};
use taskdeck_core::{NewProject, NewTask};
use taskdeck_store::patch::{ProjectPatch, TaskPatch};
use taskdeck_store::{DocumentStore, StoreError};

static TRACING: Once = Once::new();

/// Installs a test subscriber once per process. Safe to call from every test.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn sample_owner() -> UserId {
    UserId::from("user-1")
}

pub fn sample_project() -> Project {
    Project {
        id: ProjectId::from("proj-demo"),
        name: "Website Revamp".to_string(),
        description: "Refresh the marketing site before launch".to_string(),
        tags: vec!["frontend".to_string()],
        owner_id: sample_owner(),
        created_at: Utc::now(),
    }
}

pub fn sample_task(project_id: &ProjectId, name: &str, story_points: u32) -> Task {
    Task {
        id: TaskId::generate(),
        project_id: project_id.clone(),
        name: name.to_string(),
        assignee: None,
        due_date: None,
        story_points,
        status: TaskStatus::Todo,
        created_at: Utc::now(),
    }
}

/// Three tasks spanning the risk bands: one high (90), one medium (50),
/// one low (20), with one completed and one in progress.
pub fn sample_tasks(project_id: &ProjectId) -> Vec<Task> {
    let mut checkout = sample_task(project_id, "Implement checkout", 9);
    checkout.assignee = Some("Sarah Johnson".to_string());
    checkout.status = TaskStatus::InProgress;

    let mut landing = sample_task(project_id, "Style landing page", 5);
    landing.assignee = Some("Mike Chen".to_string());
    landing.due_date = Some(DueDateValue::from(45000.0));

    let mut copy = sample_task(project_id, "Write onboarding copy", 2);
    copy.status = TaskStatus::Done;

    vec![checkout, landing, copy]
}

/// Identity provider scripted around one known account.
///
/// `sign_in_with_email` succeeds only for the configured email and password.
/// Sign-up for the configured email reports an existing account; any other
/// email creates and signs in a fresh user.
pub struct StaticIdentity {
    user: AuthUser,
    password: String,
    session: Mutex<Option<AuthUser>>,
}

impl StaticIdentity {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            user: AuthUser::new("user-1")
                .with_email(email)
                .with_display_name("Sarah Johnson"),
            password: password.to_string(),
            session: Mutex::new(None),
        }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn sign_in_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, IdentityError> {
        if self.user.email.as_deref() == Some(email) && self.password == password {
            *self.session.lock() = Some(self.user.clone());
            Ok(self.user.clone())
        } else {
            Err(IdentityError::InvalidCredentials)
        }
    }

    async fn sign_up_with_email(
        &self,
        email: &str,
        _password: &str,
    ) -> Result<AuthUser, IdentityError> {
        if self.user.email.as_deref() == Some(email) {
            return Err(IdentityError::AccountExists(email.to_string()));
        }
        let user = AuthUser::new(format!("user-{email}")).with_email(email);
        *self.session.lock() = Some(user.clone());
        Ok(user)
    }

    async fn sign_in_with_google(&self) -> Result<AuthUser, IdentityError> {
        *self.session.lock() = Some(self.user.clone());
        Ok(self.user.clone())
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        *self.session.lock() = None;
        Ok(())
    }

    fn current_user(&self) -> Option<AuthUser> {
        self.session.lock().clone()
    }
}

/// Store wrapper that fails one chosen `create_task` call.
///
/// Calls are counted from one; the call whose index equals `fail_on`
/// returns a service error, every other call passes through.
pub struct FlakyStore<S> {
    inner: S,
    fail_on: usize,
    creates: AtomicUsize,
}

impl<S> FlakyStore<S> {
    pub fn failing_create_at(inner: S, fail_on: usize) -> Self {
        Self {
            inner,
            fail_on,
            creates: AtomicUsize::new(0),
        }
    }

    pub fn create_calls(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<S: DocumentStore> DocumentStore for FlakyStore<S> {
    async fn create_project(
        &self,
        new: NewProject,
        owner: &UserId,
    ) -> Result<Project, StoreError> {
        self.inner.create_project(new, owner).await
    }

    async fn projects_for_owner(&self, owner: &UserId) -> Result<Vec<Project>, StoreError> {
        self.inner.projects_for_owner(owner).await
    }

    async fn project(&self, id: &ProjectId) -> Result<Option<Project>, StoreError> {
        self.inner.project(id).await
    }

    async fn update_project(
        &self,
        id: &ProjectId,
        patch: ProjectPatch,
    ) -> Result<Project, StoreError> {
        self.inner.update_project(id, patch).await
    }

    async fn delete_project(&self, id: &ProjectId) -> Result<(), StoreError> {
        self.inner.delete_project(id).await
    }

    async fn create_task(&self, new: NewTask) -> Result<Task, StoreError> {
        let call = self.creates.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_on {
            return Err(StoreError::Service {
                status: 500,
                message: format!("injected failure on create_task call {call}"),
            });
        }
        self.inner.create_task(new).await
    }

    async fn tasks_for_project(&self, project: &ProjectId) -> Result<Vec<Task>, StoreError> {
        self.inner.tasks_for_project(project).await
    }

    async fn task(&self, id: &TaskId) -> Result<Option<Task>, StoreError> {
        self.inner.task(id).await
    }

    async fn update_task(&self, id: &TaskId, patch: TaskPatch) -> Result<Task, StoreError> {
        self.inner.update_task(id, patch).await
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), StoreError> {
        self.inner.delete_task(id).await
    }
}
