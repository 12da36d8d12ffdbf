//! Aggregate task metrics
//!
//! Summarizes a task list into the counters shown on project overview
//! cards. All values derive from the tasks passed in; nothing is cached.

use serde::{Deserialize, Serialize};

use crate::risk::{risk_score, HIGH_RISK_THRESHOLD};
use crate::types::{Task, TaskStatus};

/// Snapshot of a project's task list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskMetrics {
    /// Number of tasks
    pub total: usize,
    /// Tasks whose risk score is above 70
    pub high_risk: usize,
    /// Mean risk score, floored; zero when there are no tasks
    pub avg_risk: u8,
    /// Tasks with status `done`
    pub completed: usize,
    /// Tasks with status `in-progress`
    pub in_progress: usize,
}

impl TaskMetrics {
    /// Compute metrics over a task list
    #[must_use]
    pub fn compute(tasks: &[Task]) -> Self {
        if tasks.is_empty() {
            return Self::default();
        }

        let mut high_risk = 0;
        let mut completed = 0;
        let mut in_progress = 0;
        let mut risk_sum: u64 = 0;

        for task in tasks {
            let score = risk_score(Some(f64::from(task.story_points)));
            risk_sum += u64::from(score);
            if score > HIGH_RISK_THRESHOLD {
                high_risk += 1;
            }
            match task.status {
                TaskStatus::Done => completed += 1,
                TaskStatus::InProgress => in_progress += 1,
                TaskStatus::Todo => {}
            }
        }

        let avg_risk = (risk_sum / tasks.len() as u64) as u8;

        Self {
            total: tasks.len(),
            high_risk,
            avg_risk,
            completed,
            in_progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DueDateValue, ProjectId, TaskId};
    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;

    fn task(points: u32, status: TaskStatus) -> Task {
        Task {
            id: TaskId::generate(),
            project_id: ProjectId::from("p1"),
            name: "task".to_string(),
            assignee: None,
            due_date: Some(DueDateValue::from("2024-03-15")),
            story_points: points,
            status,
            created_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    #[test]
    fn empty_list_is_all_zeros() {
        assert_eq!(TaskMetrics::compute(&[]), TaskMetrics::default());
    }

    #[test]
    fn counts_statuses_and_high_risk() {
        let tasks = vec![
            task(8, TaskStatus::Todo),
            task(3, TaskStatus::InProgress),
            task(1, TaskStatus::Done),
            task(13, TaskStatus::Done),
        ];
        let metrics = TaskMetrics::compute(&tasks);

        assert_eq!(metrics.total, 4);
        // scores: 80, 30, 10, 100; two above 70
        assert_eq!(metrics.high_risk, 2);
        assert_eq!(metrics.completed, 2);
        assert_eq!(metrics.in_progress, 1);
    }

    #[test]
    fn a_two_task_list_averages_cleanly() {
        // scores: 80, 20
        let tasks = vec![task(8, TaskStatus::Todo), task(2, TaskStatus::Todo)];
        let metrics = TaskMetrics::compute(&tasks);
        assert_eq!(metrics.avg_risk, 50);
        assert_eq!(metrics.high_risk, 1);
    }

    #[test]
    fn average_floors_toward_zero() {
        // scores: 10, 20, 50; mean is 26.66
        let tasks = vec![
            task(1, TaskStatus::Todo),
            task(2, TaskStatus::Todo),
            task(5, TaskStatus::Todo),
        ];
        assert_eq!(TaskMetrics::compute(&tasks).avg_risk, 26);
    }

    #[test]
    fn boundary_score_of_seventy_is_not_high_risk() {
        let tasks = vec![task(7, TaskStatus::Todo)];
        assert_eq!(TaskMetrics::compute(&tasks).high_risk, 0);
    }
}
