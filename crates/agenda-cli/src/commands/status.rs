use crate::cli::{DoCommand, StartCommand};
use crate::util::resolve_task_id;
use agenda_core::models::TaskStatus;
use agenda_core::store::{MemoryStore, TaskStore};
use anyhow::Result;
use owo_colors::OwoColorize;

pub async fn do_task(store: &MemoryStore, command: DoCommand) -> Result<()> {
    let task_id = resolve_task_id(store, &command.id).await?;
    let task = store.mark_completed(task_id).await?;
    println!(
        "{} Completed: {}",
        "✓".green().bold(),
        task.name.bright_white().bold()
    );
    Ok(())
}

pub async fn start_task(store: &MemoryStore, command: StartCommand) -> Result<()> {
    let task_id = resolve_task_id(store, &command.id).await?;
    let task = store.set_status(task_id, TaskStatus::InProgress).await?;
    println!(
        "{} Started: {}",
        "✓".green().bold(),
        task.name.bright_white().bold()
    );
    Ok(())
}
