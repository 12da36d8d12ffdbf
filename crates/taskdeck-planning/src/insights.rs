//! Insight reshaping
//!
//! The response keys per-task findings by id; the UI wants rows joined
//! back to the task list with every gap filled. Missing assignees render
//! as `unassigned`, missing dates as `not set`, and a missing service
//! score falls back to the locally derived one.

use tracing::debug;

use taskdeck_core::date::parse_due_date;
use taskdeck_core::Task;

use crate::response::AnalysisResponse;

/// One display-ready row of per-task findings
#[derive(Debug, Clone, PartialEq)]
pub struct TaskInsight {
    /// Id the entry matched against
    pub task_id: String,
    /// Task name, `Unknown task` when nothing matched
    pub name: String,
    /// Assignee, `unassigned` when absent
    pub assignee: String,
    /// Due date in display form, `not set` when absent
    pub due_date: String,
    /// Service risk score, or the locally derived one
    pub risk_score: u8,
    /// Service risk label, when provided
    pub risk_level: Option<String>,
    /// Service recommendations
    pub suggestions: Vec<String>,
}

/// Aggregate findings with every field defaulted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsightsSummary {
    /// Aggregate risk, 0..=100
    pub overall_risk_score: u8,
    /// Release-level problems
    pub critical_issues: Vec<String>,
    /// Predicted slip in days
    pub predicted_release_delay_days: f64,
    /// Velocity the prediction assumed
    pub average_velocity: f64,
}

/// Join per-task findings back to the task list
#[must_use]
pub fn insights_for(tasks: &[Task], response: &AnalysisResponse) -> Vec<TaskInsight> {
    response
        .task_analysis
        .iter()
        .filter_map(|entry| {
            let Some(task_id) = entry.task_id.as_deref() else {
                debug!("dropping analysis entry without a task id");
                return None;
            };
            let task = tasks.iter().find(|t| t.id.as_str() == task_id);

            let (name, assignee, due_date, local_score) = match task {
                Some(task) => (
                    task.name.clone(),
                    task.assignee
                        .clone()
                        .filter(|a| !a.is_empty())
                        .unwrap_or_else(|| "unassigned".to_string()),
                    task.due_date
                        .as_ref()
                        .and_then(parse_due_date)
                        .map_or_else(|| "not set".to_string(), |d| {
                            d.format("%b %-d, %Y").to_string()
                        }),
                    task.risk_score(),
                ),
                None => (
                    "Unknown task".to_string(),
                    "unassigned".to_string(),
                    "not set".to_string(),
                    0,
                ),
            };

            Some(TaskInsight {
                task_id: task_id.to_string(),
                name,
                assignee,
                due_date,
                risk_score: entry.risk_score.map_or(local_score, clamp_score),
                risk_level: entry.risk_level.clone(),
                suggestions: entry.suggestions.clone(),
            })
        })
        .collect()
}

/// The aggregate block, defaults applied
#[must_use]
pub fn summary(response: &AnalysisResponse) -> InsightsSummary {
    InsightsSummary {
        overall_risk_score: response.overall_risk_score.map_or(0, clamp_score),
        critical_issues: response.critical_issues.clone(),
        predicted_release_delay_days: response.predicted_release_delay_days.unwrap_or(0.0),
        average_velocity: response.average_velocity.unwrap_or(0.0),
    }
}

fn clamp_score(score: f64) -> u8 {
    if score.is_nan() || score <= 0.0 {
        return 0;
    }
    score.min(100.0) as u8
}
