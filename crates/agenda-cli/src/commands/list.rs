use crate::cli::ListCommand;
use crate::config::Config;
use crate::util::{require_project_id, with_project_names};
use crate::views::table::display_tasks;
use agenda_core::models::{TaskKind, TaskPriority, TaskStatus};
use agenda_core::stats;
use agenda_core::store::{MemoryStore, TaskStore, ViewOrder};
use anyhow::Result;

pub async fn list_tasks(store: &MemoryStore, command: ListCommand, config: &Config) -> Result<()> {
    let status = command
        .status
        .as_deref()
        .map(|raw| raw.parse::<TaskStatus>())
        .transpose()?;
    let priority = command
        .priority
        .as_deref()
        .map(|raw| raw.parse::<TaskPriority>())
        .transpose()?;
    let kind = command
        .kind
        .as_deref()
        .map(|raw| raw.parse::<TaskKind>())
        .transpose()?;
    let project_id = match command.project.as_deref() {
        Some(name) => Some(require_project_id(store, name).await?),
        None => None,
    };

    let mut tasks = store.all_tasks().await?;
    tasks.retain(|task| {
        status.map_or(true, |s| task.status == s)
            && priority.map_or(true, |p| task.priority == p)
            && kind.map_or(true, |k| task.kind == k)
            && project_id.map_or(true, |id| task.project_id == Some(id))
    });

    let order = if command.by_deadline {
        ViewOrder::EndTime
    } else {
        config.view_order()
    };
    match order {
        ViewOrder::Priority => tasks.sort_by(stats::by_priority),
        ViewOrder::EndTime => tasks.sort_by(stats::by_end_time),
    }

    let views = with_project_names(store, tasks).await?;
    display_tasks(&views);
    Ok(())
}
