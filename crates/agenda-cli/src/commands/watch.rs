use agenda_core::reminder::ReminderLoop;
use agenda_core::store::MemoryStore;
use anyhow::Result;
use owo_colors::OwoColorize;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;

/// Runs the shared reminder loop in the foreground, printing each fired
/// event until Ctrl-C.
pub async fn watch_reminders(store: Arc<MemoryStore>) -> Result<()> {
    let mut events = store.subscribe();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let handle = tokio::spawn(ReminderLoop::new(Arc::clone(&store)).run(shutdown_rx));

    println!(
        "Watching reminders every {}s. Press Ctrl-C to stop.",
        store.config().poll_interval_secs
    );

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            event = events.recv() => match event {
                Ok(fired) => {
                    println!(
                        "{} {} starts at {}",
                        "Reminder:".yellow().bold(),
                        fired.task_name.bright_white().bold(),
                        fired.start_at.format("%Y-%m-%d %H:%M").to_string().cyan()
                    );
                }
                Err(RecvError::Lagged(missed)) => {
                    eprintln!(
                        "{} dropped {missed} reminder event(s)",
                        "Warning:".yellow().bold()
                    );
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    let _ = shutdown_tx.send(true);
    let _ = handle.await;
    println!("Stopped.");
    Ok(())
}
