//! Optimization suggestions
//!
//! Each analyzed task gets one actionable suggestion pairing its current
//! assignee, size, and due date with recommended values. Service
//! recommendations win when present; otherwise the fallbacks reproduce
//! the product's standing defaults (keep the current assignee or hand it
//! to the configured default, and trim two points, never below one).

use taskdeck_core::date::format_for_backend;
use taskdeck_core::{Task, TaskId};

use crate::config::PlanningConfig;
use crate::response::{AnalysisResponse, TaskAnalysis};

/// A ready-to-apply optimization for one task
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    /// Task the suggestion targets
    pub task_id: TaskId,
    /// Task name, for display alongside the recommendation
    pub task_name: String,
    /// Assignee as stored right now
    pub current_assignee: Option<String>,
    /// Size estimate as stored right now
    pub current_story_points: u32,
    /// Due date as stored right now, in wire form
    pub current_due_date: Option<String>,
    /// Suggested assignee, never empty
    pub recommended_assignee: String,
    /// Suggested size estimate, at least one point
    pub recommended_story_points: u32,
    /// Suggested due date in wire form, when one exists
    pub recommended_due_date: Option<String>,
    /// Problems the service flagged on this task
    pub issues: Vec<String>,
    /// Service explanation for the recommendation
    pub reasoning: Option<String>,
    /// Expected risk drop if applied
    pub risk_reduction: Option<f64>,
    /// Days saved against the predicted timeline
    pub timeline_days_saved: Option<f64>,
    /// Service confidence in the recommendation, 0..=1
    pub confidence: Option<f64>,
}

/// Derive the suggestion for one task
#[must_use]
pub fn suggestion_for(
    task: &Task,
    analysis: Option<&TaskAnalysis>,
    config: &PlanningConfig,
) -> Suggestion {
    let service_assignee = analysis
        .and_then(|a| a.optimal_assignee.as_deref())
        .filter(|a| !a.is_empty());
    let recommended_assignee = service_assignee
        .or(task.assignee.as_deref().filter(|a| !a.is_empty()))
        .unwrap_or(&config.default_assignee)
        .to_string();

    let service_points = analysis
        .and_then(|a| a.optimal_story_points)
        .map(coerce_suggested_points)
        .filter(|points| *points > 0);
    let recommended_story_points =
        service_points.unwrap_or_else(|| task.story_points.saturating_sub(2).max(1));

    let current_due_date = format_for_backend(task.due_date.as_ref());
    let service_date = analysis
        .and_then(|a| a.predicted_completion_date.clone())
        .filter(|d| !d.is_empty());
    let recommended_due_date = service_date.or_else(|| current_due_date.clone());

    Suggestion {
        task_id: task.id.clone(),
        task_name: task.name.clone(),
        current_assignee: task.assignee.clone(),
        current_story_points: task.story_points,
        current_due_date,
        recommended_assignee,
        recommended_story_points,
        recommended_due_date,
        issues: analysis.map(|a| a.suggestions.clone()).unwrap_or_default(),
        reasoning: analysis.and_then(|a| a.reasoning.clone()),
        risk_reduction: analysis.and_then(|a| a.risk_reduction),
        timeline_days_saved: analysis.and_then(|a| a.timeline_impact_days),
        confidence: analysis.and_then(|a| a.confidence),
    }
}

/// One suggestion per task, pairing each with its service findings
#[must_use]
pub fn suggestions_for(
    tasks: &[Task],
    response: &AnalysisResponse,
    config: &PlanningConfig,
) -> Vec<Suggestion> {
    tasks
        .iter()
        .map(|task| suggestion_for(task, response.analysis_for(task.id.as_str()), config))
        .collect()
}

fn coerce_suggested_points(points: f64) -> u32 {
    if points.is_nan() || points <= 0.0 {
        return 0;
    }
    points.floor().min(100.0) as u32
}
