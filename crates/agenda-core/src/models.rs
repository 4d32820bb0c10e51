use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Completed,
    Delayed,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid task status: {0}")]
pub struct ParseTaskStatusError(String);

impl FromStr for TaskStatus {
    type Err = ParseTaskStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "not-started" | "notstarted" | "todo" => Ok(TaskStatus::NotStarted),
            "in-progress" | "inprogress" | "doing" => Ok(TaskStatus::InProgress),
            "completed" | "done" => Ok(TaskStatus::Completed),
            "delayed" | "overdue" => Ok(TaskStatus::Delayed),
            _ => Err(ParseTaskStatusError(s.to_string())),
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::NotStarted => write!(f, "not-started"),
            TaskStatus::InProgress => write!(f, "in-progress"),
            TaskStatus::Completed => write!(f, "completed"),
            TaskStatus::Delayed => write!(f, "delayed"),
        }
    }
}

/// Ordered ascending: `Low < Medium < High < Urgent`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid task priority: {0}")]
pub struct ParseTaskPriorityError(String);

impl FromStr for TaskPriority {
    type Err = ParseTaskPriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            "urgent" => Ok(TaskPriority::Urgent),
            _ => Err(ParseTaskPriorityError(s.to_string())),
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskPriority::Low => write!(f, "low"),
            TaskPriority::Medium => write!(f, "medium"),
            TaskPriority::High => write!(f, "high"),
            TaskPriority::Urgent => write!(f, "urgent"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Meeting,
    Deadline,
    #[default]
    Daily,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid task kind: {0}")]
pub struct ParseTaskKindError(String);

impl FromStr for TaskKind {
    type Err = ParseTaskKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "meeting" => Ok(TaskKind::Meeting),
            "deadline" => Ok(TaskKind::Deadline),
            "daily" => Ok(TaskKind::Daily),
            _ => Err(ParseTaskKindError(s.to_string())),
        }
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskKind::Meeting => write!(f, "meeting"),
            TaskKind::Deadline => write!(f, "deadline"),
            TaskKind::Daily => write!(f, "daily"),
        }
    }
}

/// A schedulable unit occupying `[start_at, end_at)`.
///
/// Invariant (enforced by the store, never bypassed): `start_at <= end_at`.
/// The reminder instant is always derived from `start_at` and
/// `lead_minutes`; it is not an independent field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    pub content: Option<String>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub kind: TaskKind,
    /// Reference only; the project does not own the task.
    pub project_id: Option<Uuid>,
    /// Minutes before `start_at` at which the reminder becomes due.
    pub lead_minutes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// The derived reminder instant: `start_at - lead_minutes`.
    pub fn remind_at(&self) -> DateTime<Utc> {
        self.start_at - Duration::minutes(self.lead_minutes)
    }

    /// A task is overdue once its end has passed without completion.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status != TaskStatus::Completed && now > self.end_at
    }

    /// Zero-duration tasks occupy an empty interval and never conflict.
    pub fn is_instant(&self) -> bool {
        self.start_at == self.end_at
    }
}

#[derive(Debug, Clone)]
pub struct NewTaskData {
    /// Assigned by the store when absent.
    pub id: Option<Uuid>,
    pub name: String,
    pub content: Option<String>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    pub kind: Option<TaskKind>,
    pub project_id: Option<Uuid>,
    /// Falls back to `SchedulerConfig::default_lead_minutes` when absent.
    pub lead_minutes: Option<i64>,
}

impl NewTaskData {
    pub fn new(name: impl Into<String>, start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            name: name.into(),
            content: None,
            start_at,
            end_at,
            priority: None,
            status: None,
            kind: None,
            project_id: None,
            lead_minutes: None,
        }
    }
}

/// Patch applied by `update_task`. `None` leaves the field untouched;
/// double-Option fields distinguish "clear" from "keep".
#[derive(Debug, Clone, Default)]
pub struct UpdateTaskData {
    pub name: Option<String>,
    pub content: Option<Option<String>>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    pub kind: Option<TaskKind>,
    pub project_id: Option<Option<Uuid>>,
    pub lead_minutes: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct NewProjectData {
    pub name: String,
    pub description: Option<String>,
}

/// Tuning knobs for the scheduling core.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Period of the shared reminder poll tick, in seconds.
    pub poll_interval_secs: u64,
    /// Reminder lead applied to tasks that do not specify one.
    pub default_lead_minutes: i64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 60,
            default_lead_minutes: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn priority_ordering_is_ascending() {
        assert!(TaskPriority::Low < TaskPriority::Medium);
        assert!(TaskPriority::Medium < TaskPriority::High);
        assert!(TaskPriority::High < TaskPriority::Urgent);
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            TaskStatus::NotStarted,
            TaskStatus::InProgress,
            TaskStatus::Completed,
            TaskStatus::Delayed,
        ] {
            assert_eq!(status.to_string().parse::<TaskStatus>().unwrap(), status);
        }
        assert!("garbage".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn remind_at_derives_from_start_and_lead() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let task = Task {
            id: Uuid::now_v7(),
            name: "standup".to_string(),
            content: None,
            start_at: start,
            end_at: start + Duration::hours(1),
            priority: TaskPriority::Medium,
            status: TaskStatus::NotStarted,
            kind: TaskKind::Meeting,
            project_id: None,
            lead_minutes: 30,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(
            task.remind_at(),
            Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap()
        );
    }
}
