use agenda_core::store::{MemoryStore, TaskStore};
use anyhow::Result;
use owo_colors::OwoColorize;
use uuid::Uuid;

pub async fn delete_task(store: &MemoryStore, id: Uuid) -> Result<()> {
    store.delete_task(id).await?;
    println!("{} Task deleted.", "✓".green().bold());
    Ok(())
}
