use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;

use crate::{
    app_state::AppState, domain::APIError, routes::members::MemberDirectory,
    utils::auth::current_member, DataResponse,
};

use super::{parse_project_id, project_store_error, ProjectRecord};

#[tracing::instrument(name = "Get project", skip_all)]
pub async fn get_project(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(project_id): Path<String>,
) -> Result<(StatusCode, CookieJar, Json<DataResponse<ProjectRecord>>), APIError>
{
    current_member(&state.session_store, &state.member_store, &jar).await?;
    let project_id = parse_project_id(&project_id)?;

    let project = state
        .project_store
        .read()
        .await
        .get_project(&project_id)
        .await
        .map_err(project_store_error)?;

    let members = MemberDirectory::load(&state.member_store).await?;
    let record = ProjectRecord::populate(&project, &members)?;

    Ok((StatusCode::OK, jar, DataResponse::new(record)))
}
