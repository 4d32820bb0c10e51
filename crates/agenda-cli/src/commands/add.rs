use crate::cli::AddCommand;
use crate::parser::parse_instant;
use crate::util::{require_project_id, short_id};
use agenda_core::models::{NewTaskData, TaskKind, TaskPriority};
use agenda_core::store::{MemoryStore, TaskStore};
use anyhow::Result;
use owo_colors::{OwoColorize, Style};

pub async fn add_task(store: &MemoryStore, command: AddCommand) -> Result<()> {
    let start_at = parse_instant(&command.start)?;
    let end_at = parse_instant(&command.end)?;
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

    let mut data = NewTaskData::new(command.name, start_at, end_at);
    data.content = command.content;
    data.priority = priority;
    data.kind = kind;
    data.project_id = project_id;
    data.lead_minutes = command.lead;

    let task = store.add_task(data).await?;

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();
    println!(
        "{} Created task: {}",
        "✓".style(success_style),
        task.name.bright_white().bold()
    );
    println!(
        "  {} ID: {}",
        "→".style(info_style),
        short_id(task.id).yellow()
    );
    println!(
        "  {} Scheduled: {} – {}",
        "→".style(info_style),
        task.start_at.format("%Y-%m-%d %H:%M").to_string().cyan(),
        task.end_at.format("%Y-%m-%d %H:%M").to_string().cyan()
    );
    println!(
        "  {} Reminder due: {}",
        "→".style(info_style),
        task.remind_at().format("%Y-%m-%d %H:%M").to_string().cyan()
    );

    Ok(())
}
