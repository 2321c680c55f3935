use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;

use crate::{
    app_state::AppState, domain::APIError, utils::auth::current_member,
    DataResponse,
};

use super::MemberRecord;

#[tracing::instrument(name = "Get member list", skip_all)]
pub async fn get_members(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<
    (StatusCode, CookieJar, Json<DataResponse<Vec<MemberRecord>>>),
    APIError,
> {
    current_member(&state.session_store, &state.member_store, &jar).await?;

    let members = state
        .member_store
        .read()
        .await
        .get_members()
        .await
        .map_err(|e| APIError::UnexpectedError(eyre!(e)))?;

    let response = DataResponse::new(
        members.iter().map(MemberRecord::from).collect::<Vec<_>>(),
    );

    Ok((StatusCode::OK, jar, response))
}
