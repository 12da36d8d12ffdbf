//! Session-scoped orchestration
//!
//! [`DashboardService`] wires the store, identity, analysis, visual QA,
//! asset, and test-generation collaborators behind one surface. It owns
//! the per-session edit state and the recent-report history. Operations
//! are sequential: where one step feeds the next (patch then reload,
//! compare then record) they are awaited in order, and nothing retries
//! automatically.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use taskdeck_core::config::TaskdeckConfig;
use taskdeck_core::edit::{CellRef, CellSwitch, EditField, EditSession};
use taskdeck_core::identity::{AuthUser, IdentityError, IdentityProvider};
use taskdeck_core::metrics::TaskMetrics;
use taskdeck_core::types::{DueDateValue, NewProject, Project, ProjectId, Task, TaskId, TaskStatus};
use taskdeck_planning::client::{AnalysisApi, HttpAnalysisClient};
use taskdeck_planning::config::PlanningConfig;
use taskdeck_planning::insights::{insights_for, summary, InsightsSummary, TaskInsight};
use taskdeck_planning::request::{normalize, RawTask};
use taskdeck_planning::suggestion::{suggestions_for, Suggestion};
use taskdeck_qa::assets::{AssetHost, HttpAssetHost};
use taskdeck_qa::client::{HttpVisualQaClient, Tolerance, VisualQaApi};
use taskdeck_qa::history::ReportHistory;
use taskdeck_qa::report::{ComparisonRecord, ComparisonReport};
use taskdeck_store::patch::{ProjectPatch, TaskPatch};
use taskdeck_store::rest::RestDocumentStore;
use taskdeck_store::DocumentStore;
use taskdeck_testgen::{
    ExportFormat, ExportedSuite, GenerationRequest, HttpTestGenClient, TestGenApi, TestSuite,
};

use crate::error::DashboardError;
use crate::import::{self, ImportRow};

/// The collaborators a session talks to
#[derive(Clone)]
pub struct DashboardClients {
    /// Document storage
    pub store: Arc<dyn DocumentStore>,
    /// External identity provider
    pub identity: Arc<dyn IdentityProvider>,
    /// Planning analysis service
    pub analysis: Arc<dyn AnalysisApi>,
    /// Visual QA service
    pub qa: Arc<dyn VisualQaApi>,
    /// Screenshot asset host
    pub assets: Arc<dyn AssetHost>,
    /// Test-generation service
    pub testgen: Arc<dyn TestGenApi>,
}

/// Everything the project page needs in one load
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectOverview {
    /// The project document
    pub project: Project,
    /// Its tasks, in creation order
    pub tasks: Vec<Task>,
    /// Summary counts over those tasks
    pub metrics: TaskMetrics,
}

/// Reshaped output of one analysis run
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectAnalysis {
    /// Per-task rows for the insights panel
    pub insights: Vec<TaskInsight>,
    /// Release-level numbers
    pub summary: InsightsSummary,
    /// One actionable suggestion per task
    pub suggestions: Vec<Suggestion>,
}

/// Modal-style full update: every editable field at once
#[derive(Debug, Clone, PartialEq)]
pub struct TaskUpdate {
    /// New name
    pub name: String,
    /// New assignee; `None` leaves the field unassigned
    pub assignee: Option<String>,
    /// New due date; `None` clears it
    pub due_date: Option<DueDateValue>,
    /// New size estimate
    pub story_points: u32,
    /// New status
    pub status: TaskStatus,
}

/// One user session over the dashboard
pub struct DashboardService {
    store: Arc<dyn DocumentStore>,
    identity: Arc<dyn IdentityProvider>,
    analysis: Arc<dyn AnalysisApi>,
    qa: Arc<dyn VisualQaApi>,
    assets: Arc<dyn AssetHost>,
    testgen: Arc<dyn TestGenApi>,
    planning: PlanningConfig,
    edits: Mutex<EditSession>,
    history: Mutex<ReportHistory<ComparisonRecord>>,
}

impl DashboardService {
    /// Build a session over already-constructed collaborators
    #[must_use]
    pub fn new(
        clients: DashboardClients,
        config: &TaskdeckConfig,
        planning: PlanningConfig,
    ) -> Self {
        let history = match &config.history_path {
            Some(path) => ReportHistory::load(config.history_capacity, path.clone()),
            None => ReportHistory::in_memory(config.history_capacity),
        };
        Self {
            store: clients.store,
            identity: clients.identity,
            analysis: clients.analysis,
            qa: clients.qa,
            assets: clients.assets,
            testgen: clients.testgen,
            planning,
            edits: Mutex::new(EditSession::new(config.cell_switch_policy)),
            history: Mutex::new(history),
        }
    }

    /// Build a session with HTTP clients wired from configuration
    ///
    /// The identity provider stays injected; everything else is built
    /// from the configured base URLs and timeouts.
    pub fn from_config(
        identity: Arc<dyn IdentityProvider>,
        config: &TaskdeckConfig,
        planning: PlanningConfig,
    ) -> Result<Self, DashboardError> {
        config.validate()?;
        let clients = DashboardClients {
            store: Arc::new(RestDocumentStore::new(
                &config.store_base_url,
                config.store_timeout(),
            )?),
            identity,
            analysis: Arc::new(HttpAnalysisClient::new(
                &config.analysis_base_url,
                config.analysis_timeout(),
            )?),
            qa: Arc::new(HttpVisualQaClient::new(
                &config.qa_base_url,
                config.qa_timeout(),
            )?),
            assets: Arc::new(HttpAssetHost::new(
                &config.assets_base_url,
                config.asset_timeout(),
            )?),
            testgen: Arc::new(HttpTestGenClient::new(
                &config.testgen_base_url,
                config.testgen_timeout(),
            )?),
        };
        Ok(Self::new(clients, config, planning))
    }

    // ---- identity -------------------------------------------------------

    /// Sign in with an email and password
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, DashboardError> {
        let user = self.identity.sign_in_with_email(email, password).await?;
        info!(user_id = %user.id, "signed in");
        Ok(user)
    }

    /// Create an account, signing in on success
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, DashboardError> {
        let user = self.identity.sign_up_with_email(email, password).await?;
        info!(user_id = %user.id, "signed up");
        Ok(user)
    }

    /// Federated Google sign-in
    pub async fn sign_in_with_google(&self) -> Result<AuthUser, DashboardError> {
        let user = self.identity.sign_in_with_google().await?;
        info!(user_id = %user.id, "signed in with google");
        Ok(user)
    }

    /// End the current session
    pub async fn sign_out(&self) -> Result<(), DashboardError> {
        self.identity.sign_out().await?;
        info!("signed out");
        Ok(())
    }

    /// The signed-in user, or [`IdentityError::NotSignedIn`]
    pub fn current_user(&self) -> Result<AuthUser, DashboardError> {
        Ok(self.identity.current_user().ok_or(IdentityError::NotSignedIn)?)
    }

    // ---- projects -------------------------------------------------------

    /// Projects owned by the signed-in user
    pub async fn projects_for_current_user(&self) -> Result<Vec<Project>, DashboardError> {
        let user = self.current_user()?;
        Ok(self.store.projects_for_owner(&user.id).await?)
    }

    /// Create a project owned by the signed-in user
    pub async fn create_project(&self, new: NewProject) -> Result<Project, DashboardError> {
        let user = self.current_user()?;
        let project = self.store.create_project(new, &user.id).await?;
        info!(project_id = %project.id, "created project");
        Ok(project)
    }

    /// Patch a project's name, description, or tags
    pub async fn update_project(
        &self,
        id: &ProjectId,
        patch: ProjectPatch,
    ) -> Result<Project, DashboardError> {
        let project = self.store.update_project(id, patch).await?;
        info!(project_id = %project.id, "updated project");
        Ok(project)
    }

    /// Delete a project
    ///
    /// Tasks under the project are left in place; see the store contract.
    pub async fn delete_project(&self, id: &ProjectId) -> Result<(), DashboardError> {
        self.store.delete_project(id).await?;
        info!(project_id = %id, "deleted project");
        Ok(())
    }

    /// Project, tasks, and metrics in one load
    ///
    /// An absent project is an explicit empty state, not an error.
    pub async fn project_overview(
        &self,
        id: &ProjectId,
    ) -> Result<Option<ProjectOverview>, DashboardError> {
        let Some(project) = self.store.project(id).await? else {
            debug!(project_id = %id, "project not found");
            return Ok(None);
        };
        let tasks = self.store.tasks_for_project(id).await?;
        let metrics = TaskMetrics::compute(&tasks);
        Ok(Some(ProjectOverview {
            project,
            tasks,
            metrics,
        }))
    }

    // ---- tasks ----------------------------------------------------------

    /// Create a task from loose row data, applying the import defaults
    pub async fn create_task(
        &self,
        project_id: &ProjectId,
        row: &ImportRow,
    ) -> Result<Task, DashboardError> {
        let task = self
            .store
            .create_task(import::task_for_row(project_id, row))
            .await?;
        info!(task_id = %task.id, project_id = %project_id, "created task");
        Ok(task)
    }

    /// Replace every editable field of a task at once
    pub async fn update_task(
        &self,
        id: &TaskId,
        update: TaskUpdate,
    ) -> Result<Task, DashboardError> {
        let mut patch = TaskPatch::new()
            .with_name(update.name)
            .with_story_points(update.story_points)
            .with_status(update.status);
        if let Some(assignee) = update.assignee {
            patch = patch.with_assignee(assignee);
        }
        patch = match update.due_date {
            Some(due) => patch.with_due_date(due),
            None => patch.clear_due_date(),
        };

        let task = self.store.update_task(id, patch).await?;
        info!(task_id = %task.id, "updated task");
        Ok(task)
    }

    /// Delete a task
    pub async fn delete_task(&self, id: &TaskId) -> Result<(), DashboardError> {
        self.store.delete_task(id).await?;
        info!(task_id = %id, "deleted task");
        Ok(())
    }

    /// Bulk-create tasks from parsed rows; see [`import::import_tasks`]
    pub async fn import_tasks(
        &self,
        project_id: &ProjectId,
        rows: &[ImportRow],
    ) -> Result<usize, DashboardError> {
        Ok(import::import_tasks(self.store.as_ref(), project_id, rows).await?)
    }

    // ---- inline editing -------------------------------------------------

    /// Start editing one cell, seeding the draft from the task
    ///
    /// Under [`CellSwitchPolicy::CommitDraft`] a pending draft from a
    /// different cell is saved first; the updated task is returned so the
    /// caller can refresh that row.
    ///
    /// [`CellSwitchPolicy::CommitDraft`]: taskdeck_core::edit::CellSwitchPolicy::CommitDraft
    pub async fn begin_edit(
        &self,
        task: &Task,
        field: EditField,
    ) -> Result<Option<Task>, DashboardError> {
        let cell = CellRef::new(task.id.clone(), field);
        let seed = field.input_value(task);
        let outcome = self.edits.lock().begin(cell, seed);

        match outcome {
            CellSwitch::Clean => Ok(None),
            CellSwitch::Abandoned(pending) => {
                debug!(
                    task_id = %pending.cell.task_id,
                    field = %pending.cell.field,
                    "abandoned unsaved draft"
                );
                Ok(None)
            }
            CellSwitch::NeedsCommit(pending) => {
                let patch = TaskPatch::for_field(pending.cell.field, &pending.draft);
                let saved = self.store.update_task(&pending.cell.task_id, patch).await?;
                info!(task_id = %saved.id, field = %pending.cell.field, "committed draft on cell switch");
                Ok(Some(saved))
            }
        }
    }

    /// Replace the active draft text; `false` when nothing is being edited
    pub fn set_draft(&self, draft: impl Into<String>) -> bool {
        self.edits.lock().set_draft(draft)
    }

    /// The cell currently being edited, if any
    #[must_use]
    pub fn editing_cell(&self) -> Option<CellRef> {
        self.edits.lock().editing_cell().cloned()
    }

    /// The active draft text, if any
    #[must_use]
    pub fn current_draft(&self) -> Option<String> {
        self.edits.lock().draft().map(str::to_string)
    }

    /// Discard the active edit without saving
    pub fn cancel_edit(&self) {
        if let Some(pending) = self.edits.lock().cancel() {
            debug!(
                task_id = %pending.cell.task_id,
                field = %pending.cell.field,
                "cancelled edit"
            );
        }
    }

    /// Save the active draft as a single-field patch, then reload
    ///
    /// Returns the project's fresh task list, or `None` when no edit was
    /// active. On a store failure the edit is already closed; the caller
    /// retries by starting a new edit.
    pub async fn commit_edit(&self) -> Result<Option<Vec<Task>>, DashboardError> {
        let Some(pending) = self.edits.lock().commit() else {
            return Ok(None);
        };

        let patch = TaskPatch::for_field(pending.cell.field, &pending.draft);
        let task = self.store.update_task(&pending.cell.task_id, patch).await?;
        info!(task_id = %task.id, field = %pending.cell.field, "committed edit");

        let tasks = self.store.tasks_for_project(&task.project_id).await?;
        Ok(Some(tasks))
    }

    // ---- planning analysis ----------------------------------------------

    /// Run the analysis service over a project's tasks
    pub async fn analyze_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<ProjectAnalysis, DashboardError> {
        let tasks = self.store.tasks_for_project(project_id).await?;
        let raw: Vec<RawTask> = tasks.iter().map(RawTask::from).collect();
        let request = normalize(&raw, &self.planning);

        info!(project_id = %project_id, tasks = tasks.len(), "running analysis");
        let response = self.analysis.analyze(&request).await?;

        Ok(ProjectAnalysis {
            insights: insights_for(&tasks, &response),
            summary: summary(&response),
            suggestions: suggestions_for(&tasks, &response, &self.planning),
        })
    }

    /// Apply one suggestion, patching assignee, points, and due date
    pub async fn apply_suggestion(
        &self,
        suggestion: &Suggestion,
    ) -> Result<Task, DashboardError> {
        let mut patch = TaskPatch::new()
            .with_assignee(&suggestion.recommended_assignee)
            .with_story_points(suggestion.recommended_story_points);
        patch = match &suggestion.recommended_due_date {
            Some(date) => patch.with_due_date(date.as_str()),
            None => patch.clear_due_date(),
        };

        let task = self.store.update_task(&suggestion.task_id, patch).await?;
        info!(task_id = %task.id, "applied suggestion");
        Ok(task)
    }

    /// Apply suggestions in order, stopping at the first failure
    pub async fn apply_all_suggestions(
        &self,
        suggestions: &[Suggestion],
    ) -> Result<usize, DashboardError> {
        for suggestion in suggestions {
            self.apply_suggestion(suggestion).await?;
        }
        info!(applied = suggestions.len(), "applied all suggestions");
        Ok(suggestions.len())
    }

    // ---- visual QA ------------------------------------------------------

    /// UX-validate one screenshot
    pub async fn validate_ux(
        &self,
        screenshot: &[u8],
    ) -> Result<serde_json::Value, DashboardError> {
        Ok(self.qa.validate_ux(screenshot).await?)
    }

    /// Regression-scan a baseline/current screenshot pair
    pub async fn visual_regressions(
        &self,
        baseline: &[u8],
        current: &[u8],
    ) -> Result<serde_json::Value, DashboardError> {
        Ok(self.qa.visual_regressions(baseline, current).await?)
    }

    /// Run a structured UI comparison and record the report locally
    ///
    /// A history write failure is logged and swallowed; the report itself
    /// still comes back.
    pub async fn run_ui_comparison(
        &self,
        project_id: &ProjectId,
        baseline: Vec<u8>,
        current: Vec<u8>,
        tolerance: Tolerance,
    ) -> Result<ComparisonReport, DashboardError> {
        let report = self.qa.ui_comparison(baseline, current, tolerance).await?;
        info!(
            project_id = %project_id,
            failed = report.failed(),
            changes = report.changes.len(),
            "ui comparison finished"
        );

        let record = ComparisonRecord {
            project_id: project_id.clone(),
            run_at: chrono::Utc::now(),
            tolerance: tolerance.value(),
            report: report.clone(),
        };
        if let Err(err) = self.history.lock().push(record) {
            warn!(error = %err, "failed to record comparison report");
        }
        Ok(report)
    }

    /// Upload a screenshot to the asset host, returning its URL
    pub async fn upload_screenshot(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, DashboardError> {
        let url = self.assets.upload_image(file_name, bytes).await?;
        debug!(file_name, %url, "uploaded screenshot");
        Ok(url)
    }

    /// Recorded comparison reports, most recent first
    #[must_use]
    pub fn recent_reports(&self) -> Vec<ComparisonRecord> {
        self.history.lock().entries().cloned().collect()
    }

    // ---- test generation ------------------------------------------------

    /// Generate a test suite from a story and its criteria
    pub async fn generate_test_suite(
        &self,
        request: &GenerationRequest,
    ) -> Result<TestSuite, DashboardError> {
        let suite = self.testgen.generate_suite(request).await?;
        info!(suite_id = %suite.suite_id, cases = suite.case_count(), "generated test suite");
        Ok(suite)
    }

    /// Suites generated for a project
    ///
    /// Listing is non-critical: a failure degrades to an empty list with
    /// a warning.
    pub async fn test_suites(&self, project_id: &ProjectId) -> Vec<TestSuite> {
        match self.testgen.suites_for_project(project_id).await {
            Ok(suites) => suites,
            Err(err) => {
                warn!(project_id = %project_id, error = %err, "suite listing failed");
                Vec::new()
            }
        }
    }

    /// Render a suite for download
    pub async fn export_test_suite(
        &self,
        suite_id: &str,
        format: ExportFormat,
    ) -> Result<ExportedSuite, DashboardError> {
        Ok(self.testgen.export_suite(suite_id, format).await?)
    }

    /// Delete a suite
    pub async fn delete_test_suite(&self, suite_id: &str) -> Result<(), DashboardError> {
        self.testgen.delete_suite(suite_id).await?;
        info!(suite_id, "deleted test suite");
        Ok(())
    }
}
