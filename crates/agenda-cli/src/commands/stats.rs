use crate::cli::StatsCommand;
use crate::parser::parse_instant_or_now;
use crate::views::table::display_summary;
use agenda_core::stats::Summary;
use agenda_core::store::{MemoryStore, TaskStore, ViewOrder};
use anyhow::Result;
use chrono::Datelike;

pub async fn show_stats(store: &MemoryStore, command: StatsCommand) -> Result<()> {
    let now = store.now();

    let (scope, tasks) = if let Some(date) = command.week {
        let at = parse_instant_or_now(date.as_deref())?;
        let week = at.iso_week();
        (
            format!("week {}-W{:02}", week.year(), week.week()),
            store.weekly_view(at, ViewOrder::Priority).await?,
        )
    } else if let Some(date) = command.month {
        let at = parse_instant_or_now(date.as_deref())?;
        (
            format!("month {}", at.format("%Y-%m")),
            store.monthly_view(at, ViewOrder::Priority).await?,
        )
    } else {
        ("all tasks".to_string(), store.all_tasks().await?)
    };

    let summary = Summary::compute(&tasks, now);
    display_summary(&scope, &summary);
    Ok(())
}
