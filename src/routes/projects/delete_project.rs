use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;

use crate::{
    app_state::AppState,
    domain::APIError,
    routes::members::MemberDirectory,
    utils::{auth::current_member, notify::archive_project_channel},
    DataResponse,
};

use super::{parse_project_id, project_store_error, ProjectRecord};

/// Removes the project together with its tasks.
#[tracing::instrument(name = "Delete project", skip_all)]
pub async fn delete_project(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(project_id): Path<String>,
) -> Result<(StatusCode, CookieJar, Json<DataResponse<ProjectRecord>>), APIError>
{
    let acting =
        current_member(&state.session_store, &state.member_store, &jar).await?;
    if !acting.is_admin() {
        return Err(APIError::Forbidden);
    }
    let project_id = parse_project_id(&project_id)?;

    let project = state
        .project_store
        .write()
        .await
        .delete_project(&project_id)
        .await
        .map_err(project_store_error)?;

    // Postgres cascades tasks with the project row; the sweep covers stores
    // without foreign keys. Sprints name a project loosely and are kept.
    state
        .task_store
        .write()
        .await
        .delete_tasks_for_project(&project_id)
        .await
        .map_err(|e| APIError::UnexpectedError(eyre!(e)))?;

    archive_project_channel(&state.notifier, &project).await;

    let members = MemberDirectory::load(&state.member_store).await?;
    let record = ProjectRecord::populate(&project, &members)?;

    Ok((StatusCode::OK, jar, DataResponse::new(record)))
}
