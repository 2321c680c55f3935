use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;

use crate::{
    app_state::AppState,
    domain::{APIError, Project},
    routes::members::MemberDirectory,
    utils::{auth::current_member, notify::open_project_channel},
    DataResponse,
};

use super::{ProjectRecord, ProjectRequest};

#[tracing::instrument(name = "Create new project", skip_all)]
pub async fn new_project(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<ProjectRequest>,
) -> Result<(StatusCode, CookieJar, Json<DataResponse<ProjectRecord>>), APIError>
{
    let acting =
        current_member(&state.session_store, &state.member_store, &jar).await?;
    if !acting.is_admin() {
        return Err(APIError::Forbidden);
    }

    let members = MemberDirectory::load(&state.member_store).await?;
    let mut project = Project::new(request.into_fields(&members)?);

    project.slack_channel_id =
        open_project_channel(&state.notifier, project.name.as_ref()).await;

    state
        .project_store
        .write()
        .await
        .add_project(project.clone())
        .await
        .map_err(|e| APIError::UnexpectedError(eyre!(e)))?;

    let record = ProjectRecord::populate(&project, &members)?;

    Ok((StatusCode::CREATED, jar, DataResponse::new(record)))
}
