use agenda_core::clock::SystemClock;
use agenda_core::error::CoreError;
use agenda_core::storage::{JsonFileStorage, Storage};
use agenda_core::store::{MemoryStore, TaskStore};
use clap::Parser;
use dialoguer::Confirm;
use owo_colors::{OwoColorize, Style};
use std::sync::Arc;
use util::resolve_task_id;

mod cli;
mod commands;
mod config;
mod parser;
mod util;
mod views;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = config::Config::new().unwrap_or_else(|_| config::Config::default());
    let cli = cli::Cli::parse();

    let storage = JsonFileStorage::new(&config.data_file);
    let store = Arc::new(MemoryStore::new(
        config.scheduler_config(),
        Arc::new(SystemClock),
    ));

    match storage.load_all() {
        Ok((tasks, projects)) => store.restore(tasks, projects),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }

    // Every invocation sweeps for newly overdue tasks before dispatching.
    if let Err(e) = store.refresh_delayed().await {
        handle_error(e.into());
        std::process::exit(1);
    }

    let result = match cli.command {
        cli::Commands::Add(command) => commands::add::add_task(&store, command).await,
        cli::Commands::List(command) => commands::list::list_tasks(&store, command, &config).await,
        cli::Commands::Edit(command) => commands::edit::edit_task(&store, command).await,
        cli::Commands::Delete(command) => {
            let task_id = match resolve_task_id(&store, &command.id).await {
                Ok(id) => id,
                Err(e) => {
                    handle_error(e);
                    std::process::exit(1);
                }
            };
            let task = match store.find_task_by_id(task_id).await {
                Ok(Some(t)) => t,
                Ok(None) => {
                    let error_style = Style::new().red().bold();
                    eprintln!(
                        "{} Task with ID '{}' not found.",
                        "Error:".style(error_style),
                        task_id
                    );
                    std::process::exit(1);
                }
                Err(e) => {
                    handle_error(e.into());
                    std::process::exit(1);
                }
            };

            if !command.force {
                let confirmation = Confirm::new()
                    .with_prompt(format!(
                        "Are you sure you want to delete task '{}'?",
                        task.name
                    ))
                    .default(false)
                    .interact()
                    .unwrap_or(false);

                if !confirmation {
                    println!("Deletion cancelled.");
                    return;
                }
            }
            commands::delete::delete_task(&store, task_id).await
        }
        cli::Commands::Do(command) => commands::status::do_task(&store, command).await,
        cli::Commands::Start(command) => commands::status::start_task(&store, command).await,
        cli::Commands::Day(command) => {
            commands::view::show_view(&store, commands::view::ViewSpan::Day, command, &config).await
        }
        cli::Commands::Week(command) => {
            commands::view::show_view(&store, commands::view::ViewSpan::Week, command, &config)
                .await
        }
        cli::Commands::Month(command) => {
            commands::view::show_view(&store, commands::view::ViewSpan::Month, command, &config)
                .await
        }
        cli::Commands::Stats(command) => commands::stats::show_stats(&store, command).await,
        cli::Commands::Project(command) => {
            commands::project::project_command(&store, command).await
        }
        cli::Commands::Import(command) => commands::import::import_tasks(&store, command).await,
        cli::Commands::Watch => commands::watch::watch_reminders(Arc::clone(&store)).await,
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }

    let (tasks, projects) = store.snapshot();
    if let Err(e) = storage.save_all(&tasks, &projects) {
        eprintln!("{} failed to save data: {}", "Warning:".yellow().bold(), e);
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    match err.downcast_ref::<CoreError>() {
        Some(CoreError::NotFound(s)) => {
            eprintln!("{} {}", "Error:".style(error_style), s);
        }
        Some(CoreError::Validation(s)) => {
            eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
        }
        Some(CoreError::Conflict {
            existing_id,
            existing_name,
        }) => {
            eprintln!(
                "{} Time conflict with existing task '{}' ({}).",
                "Error:".style(error_style),
                existing_name.yellow(),
                existing_id
            );
        }
        Some(CoreError::AmbiguousId(matches)) => {
            eprintln!("{}", "Error: Ambiguous ID.".style(error_style));
            eprintln!("Did you mean one of these?");
            for (id, name) in matches {
                eprintln!("  {} ({})", id.yellow(), name);
            }
        }
        Some(CoreError::Storage(s)) => {
            eprintln!("{} Storage failure: {}", "Error:".style(error_style), s);
        }
        None => {
            eprintln!("{} {}", "Error:".style(error_style), err);
        }
    }
}
