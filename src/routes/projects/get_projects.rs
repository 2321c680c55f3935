use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;

use crate::{
    app_state::AppState, domain::APIError, routes::members::MemberDirectory,
    utils::auth::current_member, DataResponse,
};

use super::ProjectRecord;

#[tracing::instrument(name = "Get project list", skip_all)]
pub async fn get_projects(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<
    (StatusCode, CookieJar, Json<DataResponse<Vec<ProjectRecord>>>),
    APIError,
> {
    current_member(&state.session_store, &state.member_store, &jar).await?;

    let projects = state
        .project_store
        .read()
        .await
        .get_projects()
        .await
        .map_err(|e| APIError::UnexpectedError(eyre!(e)))?;

    let members = MemberDirectory::load(&state.member_store).await?;
    let records = projects
        .iter()
        .map(|p| ProjectRecord::populate(p, &members))
        .collect::<Result<Vec<_>, _>>()?;

    Ok((StatusCode::OK, jar, DataResponse::new(records)))
}
