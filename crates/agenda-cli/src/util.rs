use crate::views::table::ViewTask;
use agenda_core::error::CoreError;
use agenda_core::models::Task;
use agenda_core::store::{MemoryStore, ProjectStore, TaskStore};
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use uuid::Uuid;

/// Resolves a short ID prefix (or a full UUID) against the store.
pub async fn resolve_task_id(store: &MemoryStore, short_id: &str) -> Result<Uuid> {
    if let Ok(full) = short_id.parse::<Uuid>() {
        return Ok(full);
    }
    if short_id.len() < 2 {
        return Err(anyhow!(CoreError::Validation(
            "Short ID must be at least 2 characters long.".to_string()
        )));
    }
    let normalized = short_id.replace('-', "").to_lowercase();
    store
        .resolve_short_id(&normalized)
        .await
        .map_err(Into::into)
}

/// Display form of a task id: first 8 hex digits.
pub fn short_id(id: Uuid) -> String {
    id.simple().to_string()[..8].to_string()
}

/// Looks a project up by name, failing loudly when it does not exist.
pub async fn require_project_id(store: &MemoryStore, name: &str) -> Result<Uuid> {
    match store.find_project_by_name(name).await? {
        Some(project) => Ok(project.id),
        None => Err(anyhow!(CoreError::NotFound(format!(
            "Project '{name}' not found."
        )))),
    }
}

/// Pairs each task with its project's display name for the table views.
pub async fn with_project_names(store: &MemoryStore, tasks: Vec<Task>) -> Result<Vec<ViewTask>> {
    let names: HashMap<Uuid, String> = store
        .all_projects()
        .await?
        .into_iter()
        .map(|p| (p.id, p.name))
        .collect();
    Ok(tasks
        .into_iter()
        .map(|task| {
            let project_name = task.project_id.and_then(|id| names.get(&id).cloned());
            ViewTask { task, project_name }
        })
        .collect())
}
