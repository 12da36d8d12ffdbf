//! Analysis response schema
//!
//! The service's response shapes drift between versions, so every field
//! is optional with an explicit default. Consumers read what is present
//! and fall back gracefully; nothing here assumes a complete object.

use serde::{Deserialize, Serialize};

/// Per-task findings, keyed back to the request by `task_id`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskAnalysis {
    /// Id of the analyzed task
    #[serde(default)]
    pub task_id: Option<String>,
    /// Service-computed risk, 0..=100
    #[serde(default)]
    pub risk_score: Option<f64>,
    /// Service risk label, free-form
    #[serde(default)]
    pub risk_level: Option<String>,
    /// Human-readable recommendations
    #[serde(default)]
    pub suggestions: Vec<String>,
    /// Recommended assignee
    #[serde(default)]
    pub optimal_assignee: Option<String>,
    /// Recommended size estimate
    #[serde(default)]
    pub optimal_story_points: Option<f64>,
    /// Predicted completion, `YYYY-MM-DD`
    #[serde(default)]
    pub predicted_completion_date: Option<String>,
    /// Why the service recommends the change
    #[serde(default)]
    pub reasoning: Option<String>,
    /// Expected risk drop if the recommendation is applied
    #[serde(default)]
    pub risk_reduction: Option<f64>,
    /// Days saved against the predicted timeline
    #[serde(default)]
    pub timeline_impact_days: Option<f64>,
    /// Service confidence in the recommendation, 0..=1
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// Top-level analysis result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    /// Aggregate risk, 0..=100
    #[serde(default)]
    pub overall_risk_score: Option<f64>,
    /// Release-level problems worth surfacing
    #[serde(default)]
    pub critical_issues: Vec<String>,
    /// Per-task findings
    #[serde(default)]
    pub task_analysis: Vec<TaskAnalysis>,
    /// Predicted slip against the sprint plan, in days
    #[serde(default)]
    pub predicted_release_delay_days: Option<f64>,
    /// Velocity the prediction assumed
    #[serde(default)]
    pub average_velocity: Option<f64>,
}

impl AnalysisResponse {
    /// Findings for one task, when the service returned any
    #[must_use]
    pub fn analysis_for(&self, task_id: &str) -> Option<&TaskAnalysis> {
        self.task_analysis
            .iter()
            .find(|entry| entry.task_id.as_deref() == Some(task_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_deserializes_to_defaults() {
        let response: AnalysisResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response, AnalysisResponse::default());
    }

    #[test]
    fn partial_entries_fill_with_defaults() {
        let response: AnalysisResponse = serde_json::from_str(
            r#"{
                "overall_risk_score": 62,
                "task_analysis": [
                    { "task_id": "t1", "risk_level": "High" },
                    { "suggestions": ["split this task"] }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(response.overall_risk_score, Some(62.0));
        assert_eq!(response.task_analysis.len(), 2);
        assert_eq!(response.task_analysis[0].risk_level.as_deref(), Some("High"));
        assert_eq!(response.task_analysis[0].suggestions, Vec::<String>::new());
        assert_eq!(response.task_analysis[1].task_id, None);
    }

    #[test]
    fn lookup_matches_entries_by_task_id() {
        let response: AnalysisResponse = serde_json::from_str(
            r#"{ "task_analysis": [
                { "task_id": "t1", "risk_score": 80 },
                { "task_id": "t2", "risk_score": 20 }
            ]}"#,
        )
        .unwrap();

        assert_eq!(
            response.analysis_for("t2").and_then(|a| a.risk_score),
            Some(20.0)
        );
        assert!(response.analysis_for("ghost").is_none());
    }
}
