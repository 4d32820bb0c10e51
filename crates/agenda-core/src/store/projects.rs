use crate::error::CoreError;
use crate::models::{NewProjectData, Project, Task};
use crate::store::{MemoryStore, ProjectStore};
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn add_project(&self, data: NewProjectData) -> Result<Project, CoreError> {
        let now = self.now();
        let mut state = self.lock();
        if state.projects.values().any(|p| p.name == data.name) {
            return Err(CoreError::Validation(format!(
                "A project named '{}' already exists",
                data.name
            )));
        }
        let project = Project {
            id: Uuid::now_v7(),
            name: data.name,
            description: data.description,
            created_at: now,
        };
        state.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn find_project_by_id(&self, id: Uuid) -> Result<Option<Project>, CoreError> {
        Ok(self.lock().projects.get(&id).cloned())
    }

    async fn find_project_by_name(&self, name: &str) -> Result<Option<Project>, CoreError> {
        Ok(self
            .lock()
            .projects
            .values()
            .find(|p| p.name == name)
            .cloned())
    }

    async fn all_projects(&self) -> Result<Vec<Project>, CoreError> {
        Ok(self.lock().projects.values().cloned().collect())
    }

    async fn delete_project(&self, name: &str) -> Result<(), CoreError> {
        let mut state = self.lock();
        let id = state
            .projects
            .values()
            .find(|p| p.name == name)
            .map(|p| p.id)
            .ok_or_else(|| CoreError::NotFound(format!("Project '{name}'")))?;

        let referencing = state
            .tasks
            .values()
            .filter(|t| t.project_id == Some(id))
            .count();
        if referencing > 0 {
            return Err(CoreError::Validation(format!(
                "Cannot delete project '{name}' because it has {referencing} associated task(s). Delete or move the tasks first."
            )));
        }

        state.projects.remove(&id);
        Ok(())
    }

    async fn tasks_for_project(&self, id: Uuid) -> Result<Vec<Task>, CoreError> {
        let state = self.lock();
        if !state.projects.contains_key(&id) {
            return Err(CoreError::NotFound(format!("Project {id}")));
        }
        Ok(state
            .tasks
            .values()
            .filter(|t| t.project_id == Some(id))
            .cloned()
            .collect())
    }
}
