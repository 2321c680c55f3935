use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::Deserialize;

use crate::{
    app_state::AppState,
    domain::{APIError, ProjectId},
    routes::members::MemberDirectory,
    utils::auth::current_member,
    DataResponse,
};

use super::TaskRecord;

#[derive(Debug, Default, Deserialize)]
pub struct TaskListQueryParams {
    pub project: Option<String>,
}

#[tracing::instrument(name = "Get task list", skip_all)]
pub async fn get_tasks(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query_params): Query<TaskListQueryParams>,
) -> Result<(StatusCode, CookieJar, Json<DataResponse<Vec<TaskRecord>>>), APIError>
{
    current_member(&state.session_store, &state.member_store, &jar).await?;

    let project = match query_params.project.as_deref().map(ProjectId::parse) {
        Some(Ok(project)) => Some(project),
        // A filter that names no project matches no task.
        Some(Err(_)) => {
            return Ok((StatusCode::OK, jar, DataResponse::new(vec![])))
        }
        None => None,
    };

    let tasks = state
        .task_store
        .read()
        .await
        .get_tasks(project.as_ref())
        .await
        .map_err(|e| APIError::UnexpectedError(eyre!(e)))?;

    let members = MemberDirectory::load(&state.member_store).await?;
    let records = tasks
        .iter()
        .map(|t| TaskRecord::populate(t, &members))
        .collect::<Result<Vec<_>, _>>()?;

    Ok((StatusCode::OK, jar, DataResponse::new(records)))
}
