use crate::domain::{
    MemberId, ProjectId, Task, TaskId, TaskStore, TaskStoreError,
};
use std::collections::HashMap;

#[derive(Default)]
pub struct HashmapTaskStore {
    tasks: HashMap<TaskId, Task>,
    creation_order: Vec<TaskId>,
}

impl HashmapTaskStore {
    fn ordered(&self) -> impl Iterator<Item = &Task> {
        self.creation_order
            .iter()
            .filter_map(|id| self.tasks.get(id))
    }
}

#[async_trait::async_trait]
impl TaskStore for HashmapTaskStore {
    async fn add_task(&mut self, task: Task) -> Result<(), TaskStoreError> {
        if self.tasks.contains_key(&task.id) {
            return Err(TaskStoreError::TaskIDExists);
        }

        self.creation_order.push(task.id);
        self.tasks.insert(task.id, task);
        Ok(())
    }

    async fn get_task(&self, id: &TaskId) -> Result<Task, TaskStoreError> {
        self.tasks
            .get(id)
            .cloned()
            .ok_or(TaskStoreError::TaskNotFound)
    }

    async fn get_tasks(
        &self,
        project: Option<&ProjectId>,
    ) -> Result<Vec<Task>, TaskStoreError> {
        Ok(self
            .ordered()
            .filter(|t| project.map_or(true, |p| &t.project == p))
            .cloned()
            .collect())
    }

    async fn update_task(&mut self, task: Task) -> Result<(), TaskStoreError> {
        match self.tasks.get_mut(&task.id) {
            Some(stored) => {
                *stored = task;
                Ok(())
            }
            None => Err(TaskStoreError::TaskNotFound),
        }
    }

    async fn delete_task(
        &mut self,
        id: &TaskId,
    ) -> Result<Task, TaskStoreError> {
        let task = self.tasks.remove(id).ok_or(TaskStoreError::TaskNotFound)?;
        self.creation_order.retain(|t| t != id);
        Ok(task)
    }

    async fn delete_tasks_for_project(
        &mut self,
        project: &ProjectId,
    ) -> Result<(), TaskStoreError> {
        self.tasks.retain(|_, t| &t.project != project);
        let tasks = &self.tasks;
        self.creation_order.retain(|id| tasks.contains_key(id));
        Ok(())
    }

    async fn get_tasks_relying_on(
        &self,
        member: &MemberId,
    ) -> Result<Vec<Task>, TaskStoreError> {
        Ok(self
            .ordered()
            .filter(|t| t.relies_solely_on(member))
            .cloned()
            .collect())
    }
}
