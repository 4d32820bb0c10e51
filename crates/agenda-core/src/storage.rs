//! Persistence collaborator seam.
//!
//! The core treats the on-disk format as opaque; any implementation must
//! round-trip every task and project field, preserving enum values by name.
//! Storage failures surface as `CoreError::Storage` and never touch the
//! in-memory model, which stays fully usable without persistence.

use crate::error::CoreError;
use crate::models::{Project, Task};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub trait Storage: Send + Sync {
    fn load_all(&self) -> Result<(Vec<Task>, Vec<Project>), CoreError>;
    fn save_all(&self, tasks: &[Task], projects: &[Project]) -> Result<(), CoreError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    tasks: Vec<Task>,
    projects: Vec<Project>,
}

/// JSON snapshot of the whole model in a single file. Writes go through a
/// sibling temp file plus rename so a failed save cannot truncate the
/// previous snapshot.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for JsonFileStorage {
    fn load_all(&self) -> Result<(Vec<Task>, Vec<Project>), CoreError> {
        if !self.path.exists() {
            return Ok((Vec::new(), Vec::new()));
        }
        let raw = std::fs::read_to_string(&self.path)
            .map_err(|e| CoreError::Storage(format!("reading {}: {e}", self.path.display())))?;
        let snapshot: Snapshot = serde_json::from_str(&raw)
            .map_err(|e| CoreError::Storage(format!("parsing {}: {e}", self.path.display())))?;
        Ok((snapshot.tasks, snapshot.projects))
    }

    fn save_all(&self, tasks: &[Task], projects: &[Project]) -> Result<(), CoreError> {
        let snapshot = Snapshot {
            tasks: tasks.to_vec(),
            projects: projects.to_vec(),
        };
        let raw = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| CoreError::Storage(format!("serializing snapshot: {e}")))?;

        let tmp = self.path.with_extension("json.tmp");
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    CoreError::Storage(format!("creating {}: {e}", parent.display()))
                })?;
            }
        }
        std::fs::write(&tmp, raw)
            .map_err(|e| CoreError::Storage(format!("writing {}: {e}", tmp.display())))?;
        std::fs::rename(&tmp, &self.path)
            .map_err(|e| CoreError::Storage(format!("replacing {}: {e}", self.path.display())))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TaskKind, TaskPriority, TaskStatus};
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn sample_task() -> Task {
        let start = Utc.with_ymd_and_hms(2024, 5, 6, 9, 0, 0).unwrap();
        Task {
            id: Uuid::now_v7(),
            name: "quarterly review".to_string(),
            content: Some("slides and numbers".to_string()),
            start_at: start,
            end_at: start + Duration::hours(2),
            priority: TaskPriority::Urgent,
            status: TaskStatus::InProgress,
            kind: TaskKind::Meeting,
            project_id: Some(Uuid::now_v7()),
            lead_minutes: 15,
            created_at: start,
            updated_at: start,
        }
    }

    #[test]
    fn snapshot_round_trips_every_field() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = JsonFileStorage::new(dir.path().join("agenda.json"));

        let task = sample_task();
        let project = Project {
            id: task.project_id.unwrap(),
            name: "ops".to_string(),
            description: None,
            created_at: task.created_at,
        };
        storage
            .save_all(std::slice::from_ref(&task), std::slice::from_ref(&project))
            .expect("save");

        let (tasks, projects) = storage.load_all().expect("load");
        assert_eq!(tasks, vec![task]);
        assert_eq!(projects, vec![project]);
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = JsonFileStorage::new(dir.path().join("absent.json"));
        let (tasks, projects) = storage.load_all().expect("load");
        assert!(tasks.is_empty());
        assert!(projects.is_empty());
    }

    #[test]
    fn enums_serialize_by_name() {
        let raw = serde_json::to_string(&sample_task()).expect("serialize");
        assert!(raw.contains("\"urgent\""));
        assert!(raw.contains("\"in-progress\""));
        assert!(raw.contains("\"meeting\""));
    }
}
