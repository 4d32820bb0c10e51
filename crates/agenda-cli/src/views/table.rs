use agenda_core::models::{Project, Task, TaskPriority, TaskStatus};
use agenda_core::stats::Summary;
use chrono::Utc;
use chrono_humanize::Humanize;
use comfy_table::{Attribute, Cell, Color, Row, Table};

use crate::util::short_id;

#[derive(Debug, Clone)]
pub struct ViewTask {
    pub task: Task,
    pub project_name: Option<String>,
}

pub fn display_tasks(tasks: &[ViewTask]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        "ID", "Name", "Kind", "Status", "Priority", "Starts", "Ends", "Project",
    ]);

    let now = Utc::now();
    for view in tasks {
        let task = &view.task;
        let mut row = Row::new();
        row.add_cell(Cell::new(short_id(task.id)));

        let mut name_cell = Cell::new(&task.name);
        name_cell = match task.status {
            TaskStatus::Completed => name_cell
                .add_attribute(Attribute::CrossedOut)
                .fg(Color::DarkGrey),
            TaskStatus::Delayed => name_cell.fg(Color::Red),
            TaskStatus::NotStarted | TaskStatus::InProgress => match task.priority {
                TaskPriority::Urgent => name_cell.fg(Color::Red).add_attribute(Attribute::Bold),
                TaskPriority::High => name_cell.fg(Color::Red),
                TaskPriority::Medium => name_cell.fg(Color::Yellow),
                TaskPriority::Low => name_cell.fg(Color::Green),
            },
        };
        row.add_cell(name_cell);

        row.add_cell(Cell::new(task.kind.to_string()));

        let mut status_cell = Cell::new(task.status.to_string());
        status_cell = match task.status {
            TaskStatus::Completed => status_cell.fg(Color::Green),
            TaskStatus::Delayed => status_cell.fg(Color::Red),
            TaskStatus::InProgress => status_cell.fg(Color::Yellow),
            TaskStatus::NotStarted => status_cell,
        };
        row.add_cell(status_cell);

        row.add_cell(Cell::new(task.priority.to_string()));
        row.add_cell(Cell::new(task.start_at.humanize()));

        let ends_cell = if task.is_overdue(now) {
            Cell::new(task.end_at.humanize()).fg(Color::Red)
        } else {
            Cell::new(task.end_at.humanize())
        };
        row.add_cell(ends_cell);

        row.add_cell(Cell::new(view.project_name.as_deref().unwrap_or("None")));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_projects(projects: &[Project]) {
    if projects.is_empty() {
        println!("No projects found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Description", "Created"]);

    for project in projects {
        let mut row = Row::new();
        row.add_cell(Cell::new(short_id(project.id)));
        row.add_cell(Cell::new(&project.name));
        row.add_cell(Cell::new(project.description.as_deref().unwrap_or("None")));
        row.add_cell(Cell::new(project.created_at.humanize()));
        table.add_row(row);
    }

    println!("{table}");
}

/// Rounding happens here, at presentation, never inside the stats engine.
pub fn display_summary(scope: &str, summary: &Summary) {
    println!("Statistics ({scope})");

    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec![
        Cell::new("Total tasks"),
        Cell::new(summary.total.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Completed"),
        Cell::new(summary.completed.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Overdue"),
        Cell::new(summary.overdue.to_string()).fg(if summary.overdue > 0 {
            Color::Red
        } else {
            Color::Reset
        }),
    ]);
    table.add_row(vec![
        Cell::new("Completion rate"),
        Cell::new(format!("{:.1}%", summary.completion_rate)),
    ]);
    table.add_row(vec![
        Cell::new("Overdue rate"),
        Cell::new(format!("{:.1}%", summary.overdue_rate)),
    ]);
    for (kind, count) in &summary.by_kind {
        table.add_row(vec![
            Cell::new(format!("Kind: {kind}")),
            Cell::new(count.to_string()),
        ]);
    }
    for (priority, count) in &summary.by_priority {
        table.add_row(vec![
            Cell::new(format!("Priority: {priority}")),
            Cell::new(count.to_string()),
        ]);
    }

    println!("{table}");
}
