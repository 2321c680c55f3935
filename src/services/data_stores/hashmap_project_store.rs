use crate::domain::{
    MemberId, Project, ProjectId, ProjectStore, ProjectStoreError,
};
use std::collections::HashMap;

#[derive(Default)]
pub struct HashmapProjectStore {
    projects: HashMap<ProjectId, Project>,
    creation_order: Vec<ProjectId>,
}

#[async_trait::async_trait]
impl ProjectStore for HashmapProjectStore {
    async fn add_project(
        &mut self,
        project: Project,
    ) -> Result<(), ProjectStoreError> {
        if self.projects.contains_key(&project.id) {
            return Err(ProjectStoreError::ProjectIDExists);
        }

        self.creation_order.push(project.id);
        self.projects.insert(project.id, project);
        Ok(())
    }

    async fn get_project(
        &self,
        id: &ProjectId,
    ) -> Result<Project, ProjectStoreError> {
        self.projects
            .get(id)
            .cloned()
            .ok_or(ProjectStoreError::ProjectNotFound)
    }

    async fn get_projects(&self) -> Result<Vec<Project>, ProjectStoreError> {
        Ok(self
            .creation_order
            .iter()
            .filter_map(|id| self.projects.get(id).cloned())
            .collect())
    }

    async fn update_project(
        &mut self,
        project: Project,
    ) -> Result<(), ProjectStoreError> {
        match self.projects.get_mut(&project.id) {
            Some(stored) => {
                *stored = project;
                Ok(())
            }
            None => Err(ProjectStoreError::ProjectNotFound),
        }
    }

    async fn delete_project(
        &mut self,
        id: &ProjectId,
    ) -> Result<Project, ProjectStoreError> {
        let project = self
            .projects
            .remove(id)
            .ok_or(ProjectStoreError::ProjectNotFound)?;
        self.creation_order.retain(|p| p != id);
        Ok(project)
    }

    async fn get_projects_relying_on(
        &self,
        member: &MemberId,
    ) -> Result<Vec<Project>, ProjectStoreError> {
        Ok(self
            .get_projects()
            .await?
            .into_iter()
            .filter(|p| p.relies_solely_on(member))
            .collect())
    }
}
