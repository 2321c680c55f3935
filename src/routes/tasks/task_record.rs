use chrono::{DateTime, Utc};
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    app_state::AppState,
    domain::{
        APIError, Member, Priority, ProjectId, ProjectStoreError,
        RecordStoreError, SprintId, Status, Task, TaskDescription, TaskFields,
        TaskId, TaskStoreError, TaskTitle, ValidationError, ValidationErrors,
    },
    routes::{
        members::{MemberDirectory, MemberSummary},
        projects::invalid_value,
    },
};

pub const TASK_NOT_FOUND_MESSAGE: &str = "Task not found";

/// A task as sent to clients, with creator and assignees populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    #[serde(rename = "_id")]
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub project: ProjectId,
    pub date_created: DateTime<Utc>,
    pub created_by: MemberSummary,
    pub status: Status,
    pub priority: Priority,
    pub sprint: Option<SprintId>,
    pub assignees: Vec<MemberSummary>,
}

impl TaskRecord {
    pub fn populate(
        task: &Task,
        members: &MemberDirectory,
    ) -> Result<Self, APIError> {
        Ok(Self {
            id: task.id,
            title: task.title.as_ref().to_owned(),
            description: task.description.as_ref().to_owned(),
            project: task.project,
            date_created: task.date_created,
            created_by: members.required(&task.created_by)?,
            status: task.status,
            priority: task.priority,
            sprint: task.sprint,
            assignees: members.present(&task.assignees),
        })
    }
}

/// Body of task create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub project: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub sprint: Option<String>,
    pub assignees: Option<Vec<String>>,
}

/// Runs the task field rules, looking up the referenced project, sprint and
/// assignees.
#[tracing::instrument(name = "Validating task fields", skip_all)]
pub async fn parse_task_fields(
    state: &AppState,
    request: TaskRequest,
    members: &MemberDirectory,
) -> Result<TaskFields, APIError> {
    let title = TaskTitle::parse(request.title);
    let description = TaskDescription::parse(request.description);
    let project = match request.project {
        Some(raw) => existing_project(state, &raw).await?,
        None => Err(invalid_value("Project")),
    };
    let status = Status::parse(request.status);
    let priority = Priority::parse(request.priority);
    let sprint = match request.sprint.filter(|s| !s.trim().is_empty()) {
        Some(raw) => existing_sprint(state, &raw).await?.map(Some),
        None => Ok(None),
    };
    let assignees = request
        .assignees
        .ok_or_else(|| invalid_value("Assignees"))
        .and_then(|raw| {
            members.resolve_all(&raw).ok_or_else(|| {
                ValidationError::new(
                    "Assignees must be existing members".to_owned(),
                )
            })
        });

    match (title, description, project, status, priority, sprint, assignees) {
        (
            Ok(title),
            Ok(description),
            Ok(project),
            Ok(status),
            Ok(priority),
            Ok(sprint),
            Ok(assignees),
        ) => Ok(TaskFields {
            title,
            description,
            project,
            status,
            priority,
            sprint,
            assignees,
        }),
        (title, description, project, status, priority, sprint, assignees) => {
            Err(ValidationErrors::collect([
                title.as_ref().err(),
                description.as_ref().err(),
                project.as_ref().err(),
                status.as_ref().err(),
                priority.as_ref().err(),
                sprint.as_ref().err(),
                assignees.as_ref().err(),
            ])
            .into())
        }
    }
}

async fn existing_project(
    state: &AppState,
    raw: &str,
) -> Result<Result<ProjectId, ValidationError>, APIError> {
    let missing = || {
        ValidationError::new("Project must be an existing project".to_owned())
    };
    let Ok(id) = ProjectId::parse(raw) else {
        return Ok(Err(missing()));
    };

    match state.project_store.read().await.get_project(&id).await {
        Ok(_) => Ok(Ok(id)),
        Err(ProjectStoreError::ProjectNotFound) => Ok(Err(missing())),
        Err(e) => Err(APIError::UnexpectedError(eyre!(e))),
    }
}

async fn existing_sprint(
    state: &AppState,
    raw: &str,
) -> Result<Result<SprintId, ValidationError>, APIError> {
    let missing = || {
        ValidationError::new("Sprint must be an existing sprint".to_owned())
    };
    let Ok(id) = SprintId::parse(raw) else {
        return Ok(Err(missing()));
    };

    match state.sprint_store.read().await.get(&id).await {
        Ok(_) => Ok(Ok(id)),
        Err(RecordStoreError::RecordNotFound) => Ok(Err(missing())),
        Err(e) => Err(APIError::UnexpectedError(eyre!(e))),
    }
}

/// Only admins and the task's creator may change or remove it.
pub fn ensure_can_modify(acting: &Member, task: &Task) -> Result<(), APIError> {
    if acting.is_admin() || task.created_by == acting.id {
        Ok(())
    } else {
        Err(APIError::Forbidden)
    }
}

pub fn task_store_error(e: TaskStoreError) -> APIError {
    match e {
        TaskStoreError::TaskNotFound => {
            APIError::not_found(TASK_NOT_FOUND_MESSAGE)
        }
        e => APIError::UnexpectedError(eyre!(e)),
    }
}

pub fn parse_task_id(raw: &str) -> Result<TaskId, APIError> {
    TaskId::parse(raw).map_err(|_| APIError::not_found(TASK_NOT_FOUND_MESSAGE))
}
