use crate::cli::EditCommand;
use crate::parser::parse_instant;
use crate::util::{require_project_id, resolve_task_id};
use agenda_core::models::{TaskKind, TaskPriority, TaskStatus, UpdateTaskData};
use agenda_core::store::{MemoryStore, TaskStore};
use anyhow::Result;
use owo_colors::OwoColorize;

pub async fn edit_task(store: &MemoryStore, command: EditCommand) -> Result<()> {
    let task_id = resolve_task_id(store, &command.id).await?;

    let content = if command.content_clear {
        Some(None)
    } else {
        command.content.map(Some)
    };
    let project_id = if command.project_clear {
        Some(None)
    } else {
        match command.project.as_deref() {
            Some(name) => Some(Some(require_project_id(store, name).await?)),
            None => None,
        }
    };

    let data = UpdateTaskData {
        name: command.name,
        content,
        start_at: command.start.as_deref().map(parse_instant).transpose()?,
        end_at: command.end.as_deref().map(parse_instant).transpose()?,
        priority: command
            .priority
            .as_deref()
            .map(|raw| raw.parse::<TaskPriority>())
            .transpose()?,
        status: command
            .status
            .as_deref()
            .map(|raw| raw.parse::<TaskStatus>())
            .transpose()?,
        kind: command
            .kind
            .as_deref()
            .map(|raw| raw.parse::<TaskKind>())
            .transpose()?,
        project_id,
        lead_minutes: command.lead,
    };

    let task = store.update_task(task_id, data).await?;
    println!(
        "{} Updated task: {}",
        "✓".green().bold(),
        task.name.bright_white().bold()
    );
    Ok(())
}
