use crate::conflict;
use crate::error::CoreError;
use crate::models::{NewTaskData, Task, TaskStatus, UpdateTaskData};
use crate::reminder::Reminder;
use crate::store::{MemoryStore, State, TaskStore, ViewOrder};
use crate::timeindex::{DayKey, MonthKey, WeekKey};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

const MAX_NAME_LEN: usize = 50;

/// Task names: non-empty after trimming, at most 50 characters, letters and
/// digits (any script) plus whitespace, hyphen, and dot.
fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "task name must not be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "task name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_alphanumeric() || c.is_whitespace() || *c == '-' || *c == '.'))
    {
        return Err(CoreError::Validation(format!(
            "task name contains unsupported character '{bad}'"
        )));
    }
    Ok(())
}

fn validate_times(task: &Task) -> Result<(), CoreError> {
    if task.start_at > task.end_at {
        return Err(CoreError::Validation(
            "task start time must not be after its end time".to_string(),
        ));
    }
    if task.lead_minutes < 0 {
        return Err(CoreError::Validation(
            "reminder lead minutes must not be negative".to_string(),
        ));
    }
    // The derived remind_at must be representable; chrono panics on
    // out-of-range arithmetic, so the bound is enforced here instead.
    let representable = Duration::try_minutes(task.lead_minutes)
        .and_then(|lead| task.start_at.checked_sub_signed(lead))
        .is_some();
    if !representable {
        return Err(CoreError::Validation(
            "reminder lead minutes are too large".to_string(),
        ));
    }
    Ok(())
}

fn check_conflict(candidate: &Task, state: &State) -> Result<(), CoreError> {
    if let Some(existing) = conflict::find_conflict(candidate, state.tasks.values()) {
        return Err(CoreError::Conflict {
            existing_id: existing.id,
            existing_name: existing.name.clone(),
        });
    }
    Ok(())
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn add_task(&self, data: NewTaskData) -> Result<Task, CoreError> {
        self.insert_task(data, true)
    }

    async fn import_task(&self, data: NewTaskData) -> Result<Task, CoreError> {
        self.insert_task(data, false)
    }

    async fn update_task(&self, id: Uuid, data: UpdateTaskData) -> Result<Task, CoreError> {
        let now = self.now();
        let mut state = self.lock();
        let old = state
            .tasks
            .get(&id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound(format!("Task {id}")))?;

        let mut candidate = old.clone();
        if let Some(name) = &data.name {
            candidate.name = name.clone();
        }
        if let Some(content) = &data.content {
            candidate.content = content.clone();
        }
        if let Some(start_at) = data.start_at {
            candidate.start_at = start_at;
        }
        if let Some(end_at) = data.end_at {
            candidate.end_at = end_at;
        }
        if let Some(priority) = data.priority {
            candidate.priority = priority;
        }
        if let Some(status) = data.status {
            candidate.status = status;
        }
        if let Some(kind) = data.kind {
            candidate.kind = kind;
        }
        if let Some(project_id) = data.project_id {
            if let Some(pid) = project_id {
                if !state.projects.contains_key(&pid) {
                    return Err(CoreError::NotFound(format!("Project {pid}")));
                }
            }
            candidate.project_id = project_id;
        }
        if let Some(lead) = data.lead_minutes {
            candidate.lead_minutes = lead;
        }
        candidate.updated_at = now;

        // Validate the fully-patched task before touching any state, so a
        // failure leaves the old task, its indices, and its reminder
        // exactly as they were.
        validate_name(&candidate.name)?;
        validate_times(&candidate)?;
        check_conflict(&candidate, &state)?;

        state.index.remove(old.id, old.start_at);
        state.index.insert(candidate.id, candidate.start_at);

        let schedule_changed = candidate.start_at != old.start_at
            || candidate.lead_minutes != old.lead_minutes;
        if schedule_changed {
            // Recalculated reminders always reset to un-notified so the new
            // time is honored, even if the old one had already fired.
            state
                .reminders
                .insert(candidate.id, Reminder::for_task(&candidate));
        }
        if candidate.status == TaskStatus::Completed {
            if let Some(reminder) = state.reminders.get_mut(&candidate.id) {
                reminder.notified = true;
            }
        }

        state.tasks.insert(candidate.id, candidate.clone());
        Ok(candidate)
    }

    async fn delete_task(&self, id: Uuid) -> Result<(), CoreError> {
        let mut state = self.lock();
        let task = state
            .tasks
            .remove(&id)
            .ok_or_else(|| CoreError::NotFound(format!("Task {id}")))?;
        state.index.remove(task.id, task.start_at);
        state.reminders.remove(&id);
        Ok(())
    }

    async fn find_task_by_id(&self, id: Uuid) -> Result<Option<Task>, CoreError> {
        Ok(self.lock().tasks.get(&id).cloned())
    }

    async fn all_tasks(&self) -> Result<Vec<Task>, CoreError> {
        Ok(self.lock().tasks.values().cloned().collect())
    }

    async fn resolve_short_id(&self, prefix: &str) -> Result<Uuid, CoreError> {
        let state = self.lock();
        let matches: Vec<&Task> = state
            .tasks
            .values()
            .filter(|t| t.id.simple().to_string().starts_with(prefix))
            .collect();
        match matches.as_slice() {
            [] => Err(CoreError::NotFound(format!(
                "No task matches ID prefix '{prefix}'"
            ))),
            [task] => Ok(task.id),
            many => Err(CoreError::AmbiguousId(
                many.iter()
                    .map(|t| (t.id.simple().to_string()[..8].to_string(), t.name.clone()))
                    .collect(),
            )),
        }
    }

    async fn set_status(&self, id: Uuid, status: TaskStatus) -> Result<Task, CoreError> {
        let now = self.now();
        let mut state = self.lock();
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or_else(|| CoreError::NotFound(format!("Task {id}")))?;
        task.status = status;
        task.updated_at = now;
        let task = task.clone();
        if status == TaskStatus::Completed {
            // Implicit reminder cancellation: a completed task never fires.
            if let Some(reminder) = state.reminders.get_mut(&id) {
                reminder.notified = true;
            }
        }
        Ok(task)
    }

    async fn mark_completed(&self, id: Uuid) -> Result<Task, CoreError> {
        self.set_status(id, TaskStatus::Completed).await
    }

    async fn refresh_delayed(&self) -> Result<Vec<Task>, CoreError> {
        let now = self.now();
        let mut state = self.lock();
        let State {
            tasks, reminders, ..
        } = &mut *state;
        let mut changed = Vec::new();
        for task in tasks.values_mut() {
            if task.status != TaskStatus::Completed
                && task.status != TaskStatus::Delayed
                && now > task.end_at
            {
                task.status = TaskStatus::Delayed;
                task.updated_at = now;
                if let Some(reminder) = reminders.get_mut(&task.id) {
                    reminder.notified = true;
                }
                changed.push(task.clone());
            }
        }
        Ok(changed)
    }

    async fn daily_view(&self, at: DateTime<Utc>, order: ViewOrder) -> Result<Vec<Task>, CoreError> {
        let state = self.lock();
        let ids = state.index.day_tasks(DayKey::of(at)).to_vec();
        Ok(collect_sorted(&state, &ids, order))
    }

    async fn weekly_view(
        &self,
        at: DateTime<Utc>,
        order: ViewOrder,
    ) -> Result<Vec<Task>, CoreError> {
        let state = self.lock();
        let ids = state.index.week_tasks(WeekKey::of(at)).to_vec();
        Ok(collect_sorted(&state, &ids, order))
    }

    async fn monthly_view(
        &self,
        at: DateTime<Utc>,
        order: ViewOrder,
    ) -> Result<Vec<Task>, CoreError> {
        let state = self.lock();
        let ids = state.index.month_tasks(MonthKey::of(at)).to_vec();
        Ok(collect_sorted(&state, &ids, order))
    }
}

fn collect_sorted(state: &State, ids: &[Uuid], order: ViewOrder) -> Vec<Task> {
    let mut tasks: Vec<Task> = ids
        .iter()
        .filter_map(|id| state.tasks.get(id).cloned())
        .collect();
    tasks.sort_by(order.comparator());
    tasks
}

impl MemoryStore {
    fn insert_task(&self, data: NewTaskData, with_reminder: bool) -> Result<Task, CoreError> {
        let now = self.now();
        let mut state = self.lock();

        if let Some(id) = data.id {
            if state.tasks.contains_key(&id) {
                return Err(CoreError::Validation(format!("Task id {id} already exists")));
            }
        }
        if let Some(pid) = data.project_id {
            if !state.projects.contains_key(&pid) {
                return Err(CoreError::NotFound(format!("Project {pid}")));
            }
        }

        let task = Task {
            id: data.id.unwrap_or_else(Uuid::now_v7),
            name: data.name,
            content: data.content,
            start_at: data.start_at,
            end_at: data.end_at,
            priority: data.priority.unwrap_or(crate::models::TaskPriority::Medium),
            status: data.status.unwrap_or(TaskStatus::NotStarted),
            kind: data.kind.unwrap_or_default(),
            project_id: data.project_id,
            lead_minutes: data
                .lead_minutes
                .unwrap_or(self.config().default_lead_minutes),
            created_at: now,
            updated_at: now,
        };

        validate_name(&task.name)?;
        validate_times(&task)?;
        check_conflict(&task, &state)?;

        state.index.insert(task.id, task.start_at);
        if with_reminder {
            state.reminders.insert(task.id, Reminder::for_task(&task));
        }
        state.tasks.insert(task.id, task.clone());
        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Weekly sync 2024.03")]
    #[case("团队会议")]
    #[case("design-review")]
    fn name_validation_accepts_the_restricted_charset(#[case] name: &str) {
        assert!(validate_name(name).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("rm -rf /etc!")]
    #[case("semi;colon")]
    fn name_validation_rejects_bad_input(#[case] name: &str) {
        assert!(validate_name(name).is_err());
    }

    #[test]
    fn name_validation_enforces_the_length_cap() {
        assert!(validate_name(&"x".repeat(MAX_NAME_LEN)).is_ok());
        assert!(validate_name(&"x".repeat(MAX_NAME_LEN + 1)).is_err());
    }
}
