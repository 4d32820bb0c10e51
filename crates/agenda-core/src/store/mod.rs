//! Authoritative in-memory task/project store.
//!
//! `MemoryStore` guards the combined task map, project map, time index, and
//! reminder table with a single mutex: a mutation plus its derived-state
//! updates form one logical transaction, and the reminder poll runs under
//! the same lock, so readers can never observe the three mutually
//! inconsistent. Reads hand out value snapshots taken under a brief
//! critical section.

use crate::clock::{Clock, SystemClock};
use crate::error::CoreError;
use crate::models::{
    NewProjectData, NewTaskData, Project, SchedulerConfig, Task, TaskStatus, UpdateTaskData,
};
use crate::reminder::{Reminder, ReminderFired};
use crate::stats;
use crate::timeindex::TimeIndex;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::broadcast;
use uuid::Uuid;

pub mod projects;
pub mod tasks;

/// Sort applied to view query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewOrder {
    /// Priority ascending, end time ascending on ties.
    #[default]
    Priority,
    /// End time ascending, priority ascending on ties.
    EndTime,
}

impl ViewOrder {
    pub(crate) fn comparator(self) -> fn(&Task, &Task) -> Ordering {
        match self {
            ViewOrder::Priority => stats::by_priority,
            ViewOrder::EndTime => stats::by_end_time,
        }
    }
}

/// Domain-specific trait for task operations.
#[async_trait]
pub trait TaskStore {
    async fn add_task(&self, data: NewTaskData) -> Result<Task, CoreError>;
    /// Bulk-import variant of `add_task`: same validation and conflict
    /// checking, but no reminder is created.
    async fn import_task(&self, data: NewTaskData) -> Result<Task, CoreError>;
    async fn update_task(&self, id: Uuid, data: UpdateTaskData) -> Result<Task, CoreError>;
    async fn delete_task(&self, id: Uuid) -> Result<(), CoreError>;
    async fn find_task_by_id(&self, id: Uuid) -> Result<Option<Task>, CoreError>;
    async fn all_tasks(&self) -> Result<Vec<Task>, CoreError>;
    async fn resolve_short_id(&self, prefix: &str) -> Result<Uuid, CoreError>;
    async fn set_status(&self, id: Uuid, status: TaskStatus) -> Result<Task, CoreError>;
    async fn mark_completed(&self, id: Uuid) -> Result<Task, CoreError>;
    /// Marks every non-completed task whose end has passed as Delayed and
    /// suppresses its reminder. Returns the tasks that changed.
    async fn refresh_delayed(&self) -> Result<Vec<Task>, CoreError>;
    async fn daily_view(&self, at: DateTime<Utc>, order: ViewOrder) -> Result<Vec<Task>, CoreError>;
    async fn weekly_view(
        &self,
        at: DateTime<Utc>,
        order: ViewOrder,
    ) -> Result<Vec<Task>, CoreError>;
    async fn monthly_view(
        &self,
        at: DateTime<Utc>,
        order: ViewOrder,
    ) -> Result<Vec<Task>, CoreError>;
}

/// Domain-specific trait for project operations.
#[async_trait]
pub trait ProjectStore {
    async fn add_project(&self, data: NewProjectData) -> Result<Project, CoreError>;
    async fn find_project_by_id(&self, id: Uuid) -> Result<Option<Project>, CoreError>;
    async fn find_project_by_name(&self, name: &str) -> Result<Option<Project>, CoreError>;
    async fn all_projects(&self) -> Result<Vec<Project>, CoreError>;
    async fn delete_project(&self, name: &str) -> Result<(), CoreError>;
    /// Derived association: rebuilt from `Task.project_id` on every call,
    /// never maintained as a second source of truth.
    async fn tasks_for_project(&self, id: Uuid) -> Result<Vec<Task>, CoreError>;
}

/// Main store trait composing the domain traits.
pub trait Store: TaskStore + ProjectStore {}

pub(crate) struct State {
    pub(crate) tasks: HashMap<Uuid, Task>,
    pub(crate) projects: HashMap<Uuid, Project>,
    pub(crate) index: TimeIndex,
    pub(crate) reminders: HashMap<Uuid, Reminder>,
}

impl State {
    fn new() -> Self {
        Self {
            tasks: HashMap::new(),
            projects: HashMap::new(),
            index: TimeIndex::new(),
            reminders: HashMap::new(),
        }
    }
}

/// In-memory implementation of the store traits.
pub struct MemoryStore {
    state: Mutex<State>,
    clock: Arc<dyn Clock>,
    config: SchedulerConfig,
    fired_tx: broadcast::Sender<ReminderFired>,
}

impl MemoryStore {
    pub fn new(config: SchedulerConfig, clock: Arc<dyn Clock>) -> Self {
        let (fired_tx, _) = broadcast::channel(256);
        Self {
            state: Mutex::new(State::new()),
            clock,
            config,
            fired_tx,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(SchedulerConfig::default(), Arc::new(SystemClock))
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Subscribe to the reminder-fired event stream. Delivery is
    /// best-effort: events published while no receiver is attached (or
    /// after a receiver lags) are dropped.
    pub fn subscribe(&self) -> broadcast::Receiver<ReminderFired> {
        self.fired_tx.subscribe()
    }

    /// One poll tick: fires every currently-eligible reminder, in no
    /// guaranteed order, flipping each to notified exactly once. Publishes
    /// the events and returns them.
    pub fn poll_reminders(&self) -> Vec<ReminderFired> {
        let now = self.clock.now();
        let mut fired = Vec::new();
        {
            let mut state = self.lock();
            let State {
                tasks, reminders, ..
            } = &mut *state;
            for reminder in reminders.values_mut() {
                let Some(task) = tasks.get(&reminder.task_id) else {
                    continue;
                };
                if reminder.should_fire(task, now) {
                    reminder.notified = true;
                    fired.push(ReminderFired {
                        task_id: task.id,
                        task_name: task.name.clone(),
                        remind_at: reminder.remind_at,
                        start_at: task.start_at,
                    });
                }
            }
        }
        for event in &fired {
            if self.fired_tx.send(event.clone()).is_err() {
                tracing::debug!(task_id = %event.task_id, "no reminder subscribers, event dropped");
            }
        }
        fired
    }

    /// Value snapshot of the full model, for the persistence collaborator.
    pub fn snapshot(&self) -> (Vec<Task>, Vec<Project>) {
        let state = self.lock();
        (
            state.tasks.values().cloned().collect(),
            state.projects.values().cloned().collect(),
        )
    }

    /// Replaces the whole model with a persisted snapshot, rebuilding the
    /// time index and reminder table wholesale. Persisted data is trusted;
    /// no conflict re-checking runs. Reminders for tasks already completed
    /// or delayed come back suppressed so a restore does not replay
    /// historical notifications.
    pub fn restore(&self, tasks: Vec<Task>, projects: Vec<Project>) {
        let mut state = self.lock();
        *state = State::new();
        for project in projects {
            state.projects.insert(project.id, project);
        }
        for task in tasks {
            let mut reminder = Reminder::for_task(&task);
            if matches!(task.status, TaskStatus::Completed | TaskStatus::Delayed) {
                reminder.notified = true;
            }
            state.index.insert(task.id, task.start_at);
            state.reminders.insert(task.id, reminder);
            state.tasks.insert(task.id, task);
        }
    }

    /// The reminder record currently attached to a task, if any.
    pub fn reminder_for(&self, task_id: Uuid) -> Option<Reminder> {
        self.lock().reminders.get(&task_id).cloned()
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("store state mutex poisoned")
    }
}

impl Store for MemoryStore {}
