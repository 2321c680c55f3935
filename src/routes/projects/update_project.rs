use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;

use crate::{
    app_state::AppState,
    domain::APIError,
    routes::members::MemberDirectory,
    utils::{auth::current_member, notify::announce_project_update},
    DataResponse,
};

use super::{
    parse_project_id, project_store_error, ProjectRecord, ProjectRequest,
};

#[tracing::instrument(name = "Update project", skip_all)]
pub async fn update_project(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(project_id): Path<String>,
    Json(request): Json<ProjectRequest>,
) -> Result<(StatusCode, CookieJar, Json<DataResponse<ProjectRecord>>), APIError>
{
    let acting =
        current_member(&state.session_store, &state.member_store, &jar).await?;
    if !acting.is_admin() {
        return Err(APIError::Forbidden);
    }
    let project_id = parse_project_id(&project_id)?;

    let mut project = state
        .project_store
        .read()
        .await
        .get_project(&project_id)
        .await
        .map_err(project_store_error)?;

    let members = MemberDirectory::load(&state.member_store).await?;
    let fields = request.into_fields(&members)?;
    let previous_name = project.name.as_ref().to_owned();
    project.apply(fields);

    state
        .project_store
        .write()
        .await
        .update_project(project.clone())
        .await
        .map_err(project_store_error)?;

    announce_project_update(&state.notifier, &previous_name, &project).await;

    let record = ProjectRecord::populate(&project, &members)?;

    Ok((StatusCode::OK, jar, DataResponse::new(record)))
}
