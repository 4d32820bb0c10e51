use crate::cli::ViewCommand;
use crate::config::Config;
use crate::util::with_project_names;
use crate::views::table::display_tasks;
use agenda_core::store::{MemoryStore, TaskStore, ViewOrder};
use anyhow::Result;
use chrono::Datelike;

use crate::parser::parse_instant_or_now;

/// Which calendar bucket a view command reads from.
#[derive(Debug, Clone, Copy)]
pub enum ViewSpan {
    Day,
    Week,
    Month,
}

pub async fn show_view(
    store: &MemoryStore,
    span: ViewSpan,
    command: ViewCommand,
    config: &Config,
) -> Result<()> {
    let at = parse_instant_or_now(command.date.as_deref())?;
    let order = if command.by_deadline {
        ViewOrder::EndTime
    } else {
        config.view_order()
    };

    let tasks = match span {
        ViewSpan::Day => store.daily_view(at, order).await?,
        ViewSpan::Week => store.weekly_view(at, order).await?,
        ViewSpan::Month => store.monthly_view(at, order).await?,
    };

    match span {
        ViewSpan::Day => println!("Tasks on {}", at.format("%Y-%m-%d")),
        ViewSpan::Week => {
            let week = at.iso_week();
            println!("Tasks in week {}-W{:02}", week.year(), week.week());
        }
        ViewSpan::Month => println!("Tasks in {}", at.format("%Y-%m")),
    }

    let views = with_project_names(store, tasks).await?;
    display_tasks(&views);
    Ok(())
}
