//! Temporal overlap detection between tasks.
//!
//! Intervals are half-open `[start_at, end_at)`, so a task that ends exactly
//! when another begins does not conflict, and a zero-duration task conflicts
//! with nothing. Completed tasks never participate in conflict checks.

use crate::models::{Task, TaskStatus};

/// Half-open interval overlap test, symmetric in its arguments. Empty
/// intervals intersect nothing, including ones sitting strictly inside
/// another task's span, so they are excluded before the endpoint
/// comparison.
pub fn overlaps(a: &Task, b: &Task) -> bool {
    !a.is_instant() && !b.is_instant() && a.start_at < b.end_at && b.start_at < a.end_at
}

/// Returns the first active task (not Completed, not the candidate itself)
/// whose interval overlaps the candidate's, if any.
///
/// Rejection is all-or-nothing: the caller either stores the candidate
/// unchanged or resubmits with adjusted times.
pub fn find_conflict<'a>(
    candidate: &Task,
    tasks: impl IntoIterator<Item = &'a Task>,
) -> Option<&'a Task> {
    tasks.into_iter().find(|existing| {
        existing.status != TaskStatus::Completed
            && existing.id != candidate.id
            && overlaps(candidate, existing)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TaskKind, TaskPriority};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use proptest::prelude::*;
    use uuid::Uuid;

    fn task_at(start: DateTime<Utc>, end: DateTime<Utc>) -> Task {
        Task {
            id: Uuid::now_v7(),
            name: "t".to_string(),
            content: None,
            start_at: start,
            end_at: end,
            priority: TaskPriority::Medium,
            status: TaskStatus::NotStarted,
            kind: TaskKind::Daily,
            project_id: None,
            lead_minutes: 30,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, h, m, 0).unwrap()
    }

    #[test]
    fn overlapping_intervals_conflict() {
        let a = task_at(at(10, 0), at(11, 0));
        let b = task_at(at(10, 30), at(11, 30));
        assert!(overlaps(&a, &b));
        assert!(find_conflict(&b, [&a]).is_some());
    }

    #[test]
    fn touching_intervals_do_not_conflict() {
        let a = task_at(at(10, 0), at(11, 0));
        let b = task_at(at(11, 0), at(12, 0));
        assert!(!overlaps(&a, &b));
    }

    #[test]
    fn zero_duration_task_never_conflicts() {
        // Strictly inside the other task's span: endpoints alone would
        // report an overlap, yet the intersection is empty.
        let instant = task_at(at(10, 30), at(10, 30));
        let spanning = task_at(at(10, 0), at(11, 0));
        assert!(!overlaps(&instant, &spanning));
        assert!(!overlaps(&spanning, &instant));
        assert!(find_conflict(&instant, [&spanning]).is_none());
        assert!(find_conflict(&spanning, [&instant]).is_none());

        // Two empty intervals at the same instant are also fine.
        let twin = task_at(at(10, 30), at(10, 30));
        assert!(!overlaps(&instant, &twin));
    }

    #[test]
    fn completed_tasks_are_exempt() {
        let mut done = task_at(at(10, 0), at(11, 0));
        done.status = TaskStatus::Completed;
        let candidate = task_at(at(10, 30), at(11, 30));
        assert!(find_conflict(&candidate, [&done]).is_none());
    }

    #[test]
    fn delayed_tasks_still_participate() {
        let mut late = task_at(at(10, 0), at(11, 0));
        late.status = TaskStatus::Delayed;
        let candidate = task_at(at(10, 30), at(11, 30));
        assert!(find_conflict(&candidate, [&late]).is_some());
    }

    #[test]
    fn a_task_does_not_conflict_with_itself() {
        let a = task_at(at(10, 0), at(11, 0));
        assert!(find_conflict(&a, [&a]).is_none());
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            s1 in 0i64..10_000, d1 in 1i64..500,
            s2 in 0i64..10_000, d2 in 1i64..500,
        ) {
            let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
            let a = task_at(base + Duration::minutes(s1), base + Duration::minutes(s1 + d1));
            let b = task_at(base + Duration::minutes(s2), base + Duration::minutes(s2 + d2));
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }
    }
}
