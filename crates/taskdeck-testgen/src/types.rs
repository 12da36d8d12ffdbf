//! Request and response types for the test-generation service.
//!
//! The service accepts a user story plus acceptance criteria and returns a
//! generated test suite. Response decoding is tolerant: every field except
//! the suite id is optional so partial payloads still decode.

use serde::{Deserialize, Serialize};

use taskdeck_core::types::ProjectId;

/// Fallback component context applied when the caller leaves it blank.
pub const DEFAULT_COMPONENT_CONTEXT: &str = "General";

/// Fallback priority applied when the caller leaves it blank.
pub const DEFAULT_PRIORITY: &str = "P1";

/// Fallback output format applied when the caller leaves it blank.
pub const DEFAULT_TARGET_FORMAT: &str = "gherkin";

/// Payload for a suite generation call.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    /// Free-form user story the suite is generated from.
    pub user_story: String,
    /// One criterion per entry, already trimmed and non-empty.
    pub acceptance_criteria: Vec<String>,
    /// Component or feature area the story belongs to.
    pub component_context: String,
    /// Priority label forwarded to the generator.
    pub priority: String,
    /// Output format the generator should produce.
    pub target_format: String,
    /// Project the generated suite is filed under.
    pub project_id: ProjectId,
    /// Optional repository to pull implementation context from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_repo: Option<String>,
    /// Optional file path inside the repository.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_file_path: Option<String>,
    /// Optional token for private repositories.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,
}

impl GenerationRequest {
    /// Creates a request with the default context, priority and format.
    #[must_use]
    pub fn new(project_id: ProjectId, user_story: impl Into<String>) -> Self {
        Self {
            user_story: user_story.into(),
            acceptance_criteria: Vec::new(),
            component_context: DEFAULT_COMPONENT_CONTEXT.to_string(),
            priority: DEFAULT_PRIORITY.to_string(),
            target_format: DEFAULT_TARGET_FORMAT.to_string(),
            project_id,
            github_repo: None,
            github_file_path: None,
            github_token: None,
        }
    }

    /// Sets the acceptance criteria from a newline-separated block.
    ///
    /// Lines are trimmed and blank lines dropped.
    #[must_use]
    pub fn with_criteria_text(mut self, text: &str) -> Self {
        self.acceptance_criteria = split_criteria(text);
        self
    }

    /// Sets the component context. A blank value keeps the default.
    #[must_use]
    pub fn with_component_context(mut self, context: impl Into<String>) -> Self {
        let context = context.into();
        if !context.trim().is_empty() {
            self.component_context = context;
        }
        self
    }

    /// Sets the priority. A blank value keeps the default.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        let priority = priority.into();
        if !priority.trim().is_empty() {
            self.priority = priority;
        }
        self
    }

    /// Sets the target format. A blank value keeps the default.
    #[must_use]
    pub fn with_target_format(mut self, format: impl Into<String>) -> Self {
        let format = format.into();
        if !format.trim().is_empty() {
            self.target_format = format;
        }
        self
    }

    /// Attaches a GitHub source for implementation-aware generation.
    #[must_use]
    pub fn with_github_source(
        mut self,
        repo: impl Into<String>,
        file_path: impl Into<String>,
    ) -> Self {
        self.github_repo = Some(repo.into());
        self.github_file_path = Some(file_path.into());
        self
    }

    /// Attaches an access token for private repositories.
    #[must_use]
    pub fn with_github_token(mut self, token: impl Into<String>) -> Self {
        self.github_token = Some(token.into());
        self
    }
}

/// Splits a newline-separated criteria block into trimmed entries.
#[must_use]
pub fn split_criteria(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// One generated test case inside a suite.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestCase {
    /// Case identifier, `TC001` style.
    #[serde(default)]
    pub id: Option<String>,
    /// Scenario title.
    #[serde(default)]
    pub scenario: Option<String>,
    /// Steps to execute, newline-separated.
    #[serde(default)]
    pub steps: Option<String>,
    /// Expected outcome after the steps run.
    #[serde(default)]
    pub expected: Option<String>,
    /// Severity label, `High`/`Medium`/`Low` when the generator sets one.
    #[serde(default)]
    pub severity: Option<String>,
    /// Whether the case covers an edge condition.
    #[serde(default, alias = "edgeCase")]
    pub edge_case: bool,
}

/// A generated test suite as returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSuite {
    /// Service-assigned suite identifier.
    pub suite_id: String,
    /// Project the suite belongs to.
    #[serde(default)]
    pub project_id: Option<String>,
    /// Story the suite was generated from.
    #[serde(default)]
    pub user_story: Option<String>,
    /// Format the suite was generated in.
    #[serde(default)]
    pub target_format: Option<String>,
    /// Generated cases, empty when the service omits them.
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
    /// Creation timestamp as reported by the service.
    #[serde(default)]
    pub created_at: Option<String>,
}

impl TestSuite {
    /// Number of generated cases.
    #[must_use]
    pub fn case_count(&self) -> usize {
        self.test_cases.len()
    }
}

/// Download formats offered for a generated suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Raw suite document.
    Json,
    /// Gherkin feature file.
    Feature,
    /// Flat spreadsheet rows.
    Csv,
    /// Executable pytest module.
    Pytest,
}

impl ExportFormat {
    /// All offered formats, in menu order.
    pub const ALL: [Self; 4] = [Self::Json, Self::Feature, Self::Csv, Self::Pytest];

    /// Wire name used in the export route.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Feature => "feature",
            Self::Csv => "csv",
            Self::Pytest => "pytest",
        }
    }

    /// File extension for the downloaded artifact.
    ///
    /// Pytest exports are Python modules, so the extension differs from
    /// the wire name.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Feature => "feature",
            Self::Csv => "csv",
            Self::Pytest => "py",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Suggested file name for an exported suite.
#[must_use]
pub fn export_filename(suite_id: &str, format: ExportFormat) -> String {
    format!("{suite_id}.{}", format.extension())
}

/// An exported suite ready to hand to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedSuite {
    /// Suggested download name, `<suite id>.<extension>`.
    pub file_name: String,
    /// Rendered suite content.
    pub content: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn criteria_splitting_trims_and_drops_blanks() {
        let criteria = split_criteria("  first rule \n\n second rule\n   \nthird");
        assert_eq!(criteria, vec!["first rule", "second rule", "third"]);
    }

    #[test]
    fn blank_overrides_keep_the_defaults() {
        let request = GenerationRequest::new(ProjectId::from("p1"), "As a user...")
            .with_component_context("   ")
            .with_priority("")
            .with_target_format(" ");

        assert_eq!(request.component_context, DEFAULT_COMPONENT_CONTEXT);
        assert_eq!(request.priority, DEFAULT_PRIORITY);
        assert_eq!(request.target_format, DEFAULT_TARGET_FORMAT);
    }

    #[test]
    fn explicit_overrides_replace_the_defaults() {
        let request = GenerationRequest::new(ProjectId::from("p1"), "As a user...")
            .with_component_context("Checkout")
            .with_priority("P0")
            .with_target_format("pytest");

        assert_eq!(request.component_context, "Checkout");
        assert_eq!(request.priority, "P0");
        assert_eq!(request.target_format, "pytest");
    }

    #[test]
    fn github_fields_are_omitted_until_set() {
        let bare = GenerationRequest::new(ProjectId::from("p1"), "story");
        let json = serde_json::to_value(&bare).unwrap();
        assert!(json.get("github_repo").is_none());
        assert!(json.get("github_token").is_none());

        let sourced = bare
            .with_github_source("acme/shop", "src/cart.rs")
            .with_github_token("tok");
        let json = serde_json::to_value(&sourced).unwrap();
        assert_eq!(json["github_repo"], "acme/shop");
        assert_eq!(json["github_file_path"], "src/cart.rs");
        assert_eq!(json["github_token"], "tok");
    }

    #[test]
    fn pytest_exports_use_the_python_extension() {
        assert_eq!(export_filename("suite-9", ExportFormat::Pytest), "suite-9.py");
        assert_eq!(export_filename("suite-9", ExportFormat::Json), "suite-9.json");
        assert_eq!(
            export_filename("suite-9", ExportFormat::Feature),
            "suite-9.feature"
        );
        assert_eq!(export_filename("suite-9", ExportFormat::Csv), "suite-9.csv");
    }

    #[test]
    fn sparse_suite_payloads_decode() {
        let suite: TestSuite = serde_json::from_str(r#"{"suite_id":"s1"}"#).unwrap();
        assert_eq!(suite.suite_id, "s1");
        assert_eq!(suite.case_count(), 0);
        assert!(suite.created_at.is_none());
    }
}
