use crate::cli::ImportCommand;
use agenda_core::models::{NewTaskData, TaskKind, TaskPriority, TaskStatus};
use agenda_core::store::{MemoryStore, ProjectStore, TaskStore};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use owo_colors::{OwoColorize, Style};
use serde::Deserialize;

/// One row of the import file. Times are RFC 3339; the project is named,
/// not id-referenced, so files stay portable between data stores.
#[derive(Debug, Deserialize)]
struct ImportRecord {
    name: String,
    #[serde(default)]
    content: Option<String>,
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
    #[serde(default)]
    priority: Option<TaskPriority>,
    #[serde(default)]
    status: Option<TaskStatus>,
    #[serde(default)]
    kind: Option<TaskKind>,
    #[serde(default)]
    project: Option<String>,
    #[serde(default)]
    lead_minutes: Option<i64>,
}

pub async fn import_tasks(store: &MemoryStore, command: ImportCommand) -> Result<()> {
    let raw = std::fs::read_to_string(&command.file)
        .with_context(|| format!("reading {}", command.file.display()))?;
    let records: Vec<ImportRecord> =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", command.file.display()))?;

    let total = records.len();
    let mut imported = 0usize;
    let mut failures: Vec<(usize, String, String)> = Vec::new();

    for (idx, record) in records.into_iter().enumerate() {
        let project_id = match record.project.as_deref() {
            Some(name) => match store.find_project_by_name(name).await? {
                Some(project) => Some(project.id),
                None => {
                    failures.push((idx, record.name, format!("project '{name}' not found")));
                    continue;
                }
            },
            None => None,
        };

        let data = NewTaskData {
            id: None,
            name: record.name.clone(),
            content: record.content,
            start_at: record.start_at,
            end_at: record.end_at,
            priority: record.priority,
            status: record.status,
            kind: record.kind,
            project_id,
            lead_minutes: record.lead_minutes,
        };

        // Validation and conflict checking still apply; only the reminder
        // is skipped for imported rows.
        match store.import_task(data).await {
            Ok(_) => imported += 1,
            Err(e) => failures.push((idx, record.name, e.to_string())),
        }
    }

    println!(
        "Imported {imported} of {total} task(s) from {}.",
        command.file.display()
    );
    if !failures.is_empty() {
        let warn_style = Style::new().yellow().bold();
        for (idx, name, reason) in &failures {
            eprintln!(
                "{} record {} ('{}'): {}",
                "Skipped".style(warn_style),
                idx + 1,
                name,
                reason
            );
        }
    }
    Ok(())
}
