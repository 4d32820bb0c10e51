use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Conflict-aware personal scheduler with day/week/month views and reminders
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add a new task
    Add(AddCommand),
    /// List tasks
    List(ListCommand),
    /// Edit a task
    Edit(EditCommand),
    /// Delete a task
    Delete(DeleteCommand),
    /// Mark a task as completed
    Do(DoCommand),
    /// Mark a task as in progress
    Start(StartCommand),
    /// Show the tasks of one day
    Day(ViewCommand),
    /// Show the tasks of one ISO week
    Week(ViewCommand),
    /// Show the tasks of one month
    Month(ViewCommand),
    /// Show completion/overdue statistics
    Stats(StatsCommand),
    /// Manage projects
    Project(ProjectCommand),
    /// Bulk-import tasks from a JSON file (no reminders are created)
    Import(ImportCommand),
    /// Run the reminder loop in the foreground until Ctrl-C
    Watch,
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The name of the task
    pub name: String,
    /// Start time (e.g. "2024-03-15 10:00" or "tomorrow 9am")
    #[clap(short, long)]
    pub start: String,
    /// End time
    #[clap(short, long)]
    pub end: String,
    /// Free-form task content
    #[clap(short, long)]
    pub content: Option<String>,
    /// Priority (low|medium|high|urgent)
    #[clap(long)]
    pub priority: Option<String>,
    /// Kind (meeting|deadline|daily)
    #[clap(short, long)]
    pub kind: Option<String>,
    /// Project to attach the task to, by name
    #[clap(short, long)]
    pub project: Option<String>,
    /// Minutes of reminder lead before the start time
    #[clap(long)]
    pub lead: Option<i64>,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// Filter by status (not-started|in-progress|completed|delayed)
    #[clap(long)]
    pub status: Option<String>,
    /// Filter by priority
    #[clap(long)]
    pub priority: Option<String>,
    /// Filter by kind
    #[clap(short, long)]
    pub kind: Option<String>,
    /// Filter by project name
    #[clap(short, long)]
    pub project: Option<String>,
    /// Sort by end time instead of priority
    #[clap(long)]
    pub by_deadline: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct EditCommand {
    /// The ID (or unique prefix) of the task to edit
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub content: Option<String>,
    #[arg(long, conflicts_with = "content")]
    pub content_clear: bool,

    #[arg(long)]
    pub start: Option<String>,

    #[arg(long)]
    pub end: Option<String>,

    #[arg(long)]
    pub priority: Option<String>,

    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub kind: Option<String>,

    #[arg(long)]
    pub project: Option<String>,
    #[arg(long, conflicts_with = "project")]
    pub project_clear: bool,

    #[arg(long)]
    pub lead: Option<i64>,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID (or unique prefix) of the task to delete
    pub id: String,
    /// Skip the confirmation prompt
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DoCommand {
    /// The ID (or unique prefix) of the task to mark as completed
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct StartCommand {
    /// The ID (or unique prefix) of the task to mark as in progress
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct ViewCommand {
    /// Date inside the day/week/month to show (defaults to today)
    pub date: Option<String>,
    /// Sort by end time instead of priority
    #[clap(long)]
    pub by_deadline: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct StatsCommand {
    /// Scope the statistics to the week containing this date
    #[clap(long, conflicts_with = "month")]
    pub week: Option<Option<String>>,
    /// Scope the statistics to the month containing this date
    #[clap(long)]
    pub month: Option<Option<String>>,
}

#[derive(Parser, Debug, Clone)]
pub struct ProjectCommand {
    #[command(subcommand)]
    pub command: ProjectCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProjectCommands {
    /// Create a project
    Add {
        name: String,
        #[clap(short, long)]
        description: Option<String>,
    },
    /// List projects
    List,
    /// Delete a project (must have no tasks)
    Delete { name: String },
    /// Show the tasks of a project
    Tasks { name: String },
}

#[derive(Parser, Debug, Clone)]
pub struct ImportCommand {
    /// JSON file holding an array of task records
    pub file: PathBuf,
}
