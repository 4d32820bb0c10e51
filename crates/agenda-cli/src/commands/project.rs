use crate::cli::{ProjectCommand, ProjectCommands};
use crate::util::with_project_names;
use crate::views::table::{display_projects, display_tasks};
use agenda_core::error::CoreError;
use agenda_core::models::NewProjectData;
use agenda_core::store::{MemoryStore, ProjectStore};
use anyhow::Result;
use owo_colors::OwoColorize;

pub async fn project_command(store: &MemoryStore, command: ProjectCommand) -> Result<()> {
    match command.command {
        ProjectCommands::Add { name, description } => {
            let project = store.add_project(NewProjectData { name, description }).await?;
            println!(
                "{} Created project: {}",
                "✓".green().bold(),
                project.name.bright_white().bold()
            );
        }
        ProjectCommands::List => {
            let projects = store.all_projects().await?;
            display_projects(&projects);
        }
        ProjectCommands::Delete { name } => {
            store.delete_project(&name).await?;
            println!("{} Project '{}' deleted.", "✓".green().bold(), name);
        }
        ProjectCommands::Tasks { name } => {
            let project = store
                .find_project_by_name(&name)
                .await?
                .ok_or_else(|| CoreError::NotFound(format!("Project '{name}' not found.")))?;
            let tasks = store.tasks_for_project(project.id).await?;
            let views = with_project_names(store, tasks).await?;
            display_tasks(&views);
        }
    }
    Ok(())
}
