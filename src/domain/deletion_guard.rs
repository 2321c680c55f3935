use super::{
    MemberId, ProjectId, ProjectStore, ProjectStoreError, TaskId, TaskStore,
    TaskStoreError, ValidationErrors,
};
use color_eyre::eyre::{eyre, Result};

const REASONS: [&str; 6] = [
    "This member cannot be removed due to the following possibilities: ",
    "Member is the lead of a project(s)",
    "Member is the only team member of a project(s)",
    "Member is the creator of a task(s)",
    "Member is the only assignee of a task(s)",
    "Please reassign these roles before removing this member.",
];

/// Projects and tasks that would lose a required member reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeletionBlockers {
    pub projects: Vec<ProjectId>,
    pub tasks: Vec<TaskId>,
}

impl DeletionBlockers {
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty() && self.tasks.is_empty()
    }

    /// The refusal shown to the client. The list is fixed; it names every
    /// possible cause rather than the ones that actually apply.
    pub fn reasons() -> ValidationErrors {
        ValidationErrors::from_messages(
            REASONS.iter().map(|r| r.to_string()).collect(),
        )
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            tracing::debug!(
                projects = self.projects.len(),
                tasks = self.tasks.len(),
                "member deletion blocked"
            );
            Err(Self::reasons())
        }
    }
}

/// Runs the project and task guard queries for `member`.
#[tracing::instrument(name = "Finding member deletion blockers", skip_all)]
pub async fn find_deletion_blockers(
    project_store: &(dyn ProjectStore + Send + Sync),
    task_store: &(dyn TaskStore + Send + Sync),
    member: &MemberId,
) -> Result<DeletionBlockers> {
    let (projects, tasks) = tokio::try_join!(
        async {
            project_store
                .get_projects_relying_on(member)
                .await
                .map_err(|e: ProjectStoreError| eyre!(e))
        },
        async {
            task_store
                .get_tasks_relying_on(member)
                .await
                .map_err(|e: TaskStoreError| eyre!(e))
        },
    )?;

    Ok(DeletionBlockers {
        projects: projects.into_iter().map(|p| p.id).collect(),
        tasks: tasks.into_iter().map(|t| t.id).collect(),
    })
}
