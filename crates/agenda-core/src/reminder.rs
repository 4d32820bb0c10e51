//! One-shot reminders and the shared poll loop that fires them.
//!
//! Every stored task carries exactly one [`Reminder`], recalculated whenever
//! the task's start time or lead minutes change and destroyed with the task.
//! A single shared tick scans all pending reminders each cycle, giving
//! "fires within one poll interval of due time" rather than precise
//! real-time delivery. Delivery to subscribers is fire-and-forget: a lost
//! event is logged and never retried.

use crate::models::{Task, TaskStatus};
use crate::store::MemoryStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

/// Per-task reminder record. `remind_at` is always derived from the task;
/// the store keeps the two in lockstep.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub task_id: Uuid,
    pub remind_at: DateTime<Utc>,
    pub notified: bool,
}

impl Reminder {
    pub fn for_task(task: &Task) -> Self {
        Self {
            task_id: task.id,
            remind_at: task.remind_at(),
            notified: false,
        }
    }

    /// Eligible to fire: not yet notified, due, and the task has not been
    /// completed in the meantime. A reminder created with `remind_at`
    /// already in the past is eligible on the very next tick.
    pub fn should_fire(&self, task: &Task, now: DateTime<Utc>) -> bool {
        !self.notified && now >= self.remind_at && task.status != TaskStatus::Completed
    }
}

/// Event emitted exactly once per fired reminder.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderFired {
    pub task_id: Uuid,
    pub task_name: String,
    pub remind_at: DateTime<Utc>,
    pub start_at: DateTime<Utc>,
}

/// The shared poll loop. Runs until the shutdown signal flips, suspending
/// between ticks; one signal stops the loop without per-task cancellation.
pub struct ReminderLoop {
    store: Arc<MemoryStore>,
}

impl ReminderLoop {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let period = std::time::Duration::from_secs(self.store.config().poll_interval_secs.max(1));
        let mut tick = tokio::time::interval(period);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    let fired = self.store.poll_reminders();
                    for event in &fired {
                        tracing::info!(
                            task_id = %event.task_id,
                            task = %event.task_name,
                            starts_at = %event.start_at,
                            "reminder fired"
                        );
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        tracing::debug!("reminder loop stopped");
    }
}
