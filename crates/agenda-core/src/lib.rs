//! # Agenda Core Library
//!
//! The scheduling core of the agenda task manager: an authoritative
//! in-memory task/project store with time-conflict rejection, day/week/month
//! bucket indexing for views, one-shot polled reminders, and derived
//! statistics.
//!
//! ## Features
//!
//! - **Conflict-checked storage**: half-open interval overlap detection
//!   rejects double-booking against active tasks; completed tasks are exempt
//! - **Time-bucket views**: day, week (ISO-8601), and month buckets keyed
//!   from each task's start instant
//! - **Polled reminders**: a single shared tick fires due reminders exactly
//!   once, with an injectable clock for deterministic tests
//! - **Statistics**: completion/overdue rates and zero-filled enum counts as
//!   pure functions over caller-scoped task sets
//!
//! ## Core Modules
//!
//! - [`models`]: Core data structures and transfer objects
//! - [`store`]: In-memory store with domain traits
//! - [`conflict`]: Overlap detection
//! - [`timeindex`]: Day/week/month bucket maps
//! - [`reminder`]: Reminder state machine and poll loop
//! - [`stats`]: Aggregation functions and canonical orderings
//! - [`storage`]: Persistence collaborator seam
//! - [`clock`]: Injectable time source
//! - [`error`]: Error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use agenda_core::{
//!     error::CoreError,
//!     models::NewTaskData,
//!     store::{MemoryStore, TaskStore},
//! };
//! use chrono::{Duration, Utc};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), CoreError> {
//!     let store = MemoryStore::with_defaults();
//!
//!     let start = Utc::now() + Duration::hours(2);
//!     let task = store
//!         .add_task(NewTaskData::new("Team standup", start, start + Duration::minutes(30)))
//!         .await?;
//!     println!("Created task: {}", task.name);
//!
//!     Ok(())
//! }
//! ```

pub mod clock;
pub mod conflict;
pub mod error;
pub mod models;
pub mod reminder;
pub mod stats;
pub mod storage;
pub mod store;
pub mod timeindex;
