//! Stateless aggregation over a caller-supplied task slice.
//!
//! Scoping (this week, this month, one kind) happens at the call site via
//! the view queries; every function here is a pure fold over what it is
//! given. Rates are raw floating-point percentages; rounding and formatting
//! belong to the presentation layer so chained aggregations never compound
//! rounding error.

use crate::models::{Task, TaskKind, TaskPriority, TaskStatus};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

pub const ALL_KINDS: [TaskKind; 3] = [TaskKind::Meeting, TaskKind::Deadline, TaskKind::Daily];
pub const ALL_PRIORITIES: [TaskPriority; 4] = [
    TaskPriority::Low,
    TaskPriority::Medium,
    TaskPriority::High,
    TaskPriority::Urgent,
];

/// Percentage of tasks marked Completed; 0.0 for an empty slice.
pub fn completion_rate(tasks: &[Task]) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }
    let completed = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .count();
    completed as f64 / tasks.len() as f64 * 100.0
}

/// Percentage of tasks whose end has passed without completion; 0.0 for an
/// empty slice.
pub fn overdue_rate(tasks: &[Task], now: DateTime<Utc>) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }
    let overdue = tasks.iter().filter(|t| t.is_overdue(now)).count();
    overdue as f64 / tasks.len() as f64 * 100.0
}

/// Counts per kind, zero-filled over the whole enum domain.
pub fn count_by_kind(tasks: &[Task]) -> Vec<(TaskKind, usize)> {
    ALL_KINDS
        .iter()
        .map(|kind| (*kind, tasks.iter().filter(|t| t.kind == *kind).count()))
        .collect()
}

/// Counts per priority, zero-filled over the whole enum domain.
pub fn count_by_priority(tasks: &[Task]) -> Vec<(TaskPriority, usize)> {
    ALL_PRIORITIES
        .iter()
        .map(|p| (*p, tasks.iter().filter(|t| t.priority == *p).count()))
        .collect()
}

/// Canonical view ordering: priority ascending, then end time, then id.
/// The id tiebreak makes the order total; no two distinct tasks compare
/// equal.
pub fn by_priority(a: &Task, b: &Task) -> Ordering {
    a.priority
        .cmp(&b.priority)
        .then_with(|| a.end_at.cmp(&b.end_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Alternate view ordering: end time ascending, then priority, then id.
pub fn by_end_time(a: &Task, b: &Task) -> Ordering {
    a.end_at
        .cmp(&b.end_at)
        .then_with(|| a.priority.cmp(&b.priority))
        .then_with(|| a.id.cmp(&b.id))
}

/// Aggregate snapshot for one already-scoped task collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total: usize,
    pub completed: usize,
    pub overdue: usize,
    pub completion_rate: f64,
    pub overdue_rate: f64,
    pub by_kind: Vec<(TaskKind, usize)>,
    pub by_priority: Vec<(TaskPriority, usize)>,
}

impl Summary {
    pub fn compute(tasks: &[Task], now: DateTime<Utc>) -> Self {
        Self {
            total: tasks.len(),
            completed: tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Completed)
                .count(),
            overdue: tasks.iter().filter(|t| t.is_overdue(now)).count(),
            completion_rate: completion_rate(tasks),
            overdue_rate: overdue_rate(tasks, now),
            by_kind: count_by_kind(tasks),
            by_priority: count_by_priority(tasks),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    fn task(status: TaskStatus, priority: TaskPriority, end_offset_min: i64) -> Task {
        let base = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        Task {
            id: Uuid::now_v7(),
            name: "t".to_string(),
            content: None,
            start_at: base,
            end_at: base + Duration::minutes(end_offset_min),
            priority,
            status,
            kind: TaskKind::Daily,
            project_id: None,
            lead_minutes: 30,
            created_at: base,
            updated_at: base,
        }
    }

    #[test]
    fn rates_on_empty_input_are_zero() {
        let now = Utc::now();
        assert_eq!(completion_rate(&[]), 0.0);
        assert_eq!(overdue_rate(&[], now), 0.0);
    }

    #[test]
    fn completion_rate_counts_completed_share() {
        let tasks = vec![
            task(TaskStatus::Completed, TaskPriority::Low, 60),
            task(TaskStatus::Completed, TaskPriority::Low, 60),
            task(TaskStatus::NotStarted, TaskPriority::Low, 60),
            task(TaskStatus::InProgress, TaskPriority::Low, 60),
        ];
        assert_eq!(completion_rate(&tasks), 50.0);
    }

    #[test]
    fn overdue_excludes_completed_tasks() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 14, 0, 0).unwrap();
        let tasks = vec![
            // Ended at 13:00, never completed: overdue.
            task(TaskStatus::NotStarted, TaskPriority::Low, 60),
            // Ended at 13:00 but completed: not overdue.
            task(TaskStatus::Completed, TaskPriority::Low, 60),
            // Ends at 15:00: not overdue yet.
            task(TaskStatus::NotStarted, TaskPriority::Low, 180),
        ];
        assert!(tasks[0].is_overdue(now));
        assert!(!tasks[1].is_overdue(now));
        let rate = overdue_rate(&tasks, now);
        assert!((rate - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn counts_are_zero_filled_over_enum_domains() {
        let tasks = vec![task(TaskStatus::NotStarted, TaskPriority::Urgent, 60)];
        let kinds = count_by_kind(&tasks);
        assert_eq!(kinds.len(), ALL_KINDS.len());
        assert!(kinds.contains(&(TaskKind::Meeting, 0)));
        assert!(kinds.contains(&(TaskKind::Daily, 1)));

        let priorities = count_by_priority(&tasks);
        assert_eq!(priorities.len(), ALL_PRIORITIES.len());
        assert!(priorities.contains(&(TaskPriority::Low, 0)));
        assert!(priorities.contains(&(TaskPriority::Urgent, 1)));
    }

    #[test]
    fn by_priority_breaks_ties_on_end_time_then_id() {
        let a = task(TaskStatus::NotStarted, TaskPriority::High, 30);
        let b = task(TaskStatus::NotStarted, TaskPriority::High, 60);
        let c = task(TaskStatus::NotStarted, TaskPriority::Low, 10);

        let mut tasks = vec![a.clone(), b.clone(), c.clone()];
        tasks.sort_by(by_priority);
        assert_eq!(tasks[0].id, c.id);
        assert_eq!(tasks[1].id, a.id);
        assert_eq!(tasks[2].id, b.id);

        // Identical priority and end time: ordering still total via id.
        let d = task(TaskStatus::NotStarted, TaskPriority::High, 30);
        assert_ne!(by_priority(&a, &d), Ordering::Equal);
    }

    #[test]
    fn by_end_time_sorts_on_deadline_first() {
        let early = task(TaskStatus::NotStarted, TaskPriority::Low, 10);
        let late = task(TaskStatus::NotStarted, TaskPriority::Urgent, 120);
        let mut tasks = vec![late.clone(), early.clone()];
        tasks.sort_by(by_end_time);
        assert_eq!(tasks[0].id, early.id);
    }

    #[test]
    fn summary_aggregates_consistently() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 14, 0, 0).unwrap();
        let tasks = vec![
            task(TaskStatus::Completed, TaskPriority::Low, 60),
            task(TaskStatus::NotStarted, TaskPriority::High, 60),
        ];
        let summary = Summary::compute(&tasks, now);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.overdue, 1);
        assert_eq!(summary.completion_rate, 50.0);
        assert_eq!(summary.overdue_rate, 50.0);
    }
}
