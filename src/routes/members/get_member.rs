use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;

use crate::{
    app_state::AppState,
    domain::{APIError, MemberId, MemberStoreError},
    utils::auth::current_member,
    DataResponse,
};

use super::MemberRecord;

const NOT_FOUND_MESSAGE: &str = "Member not found";

#[tracing::instrument(name = "Get member", skip_all)]
pub async fn get_member(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(member_id): Path<String>,
) -> Result<(StatusCode, CookieJar, Json<DataResponse<MemberRecord>>), APIError>
{
    current_member(&state.session_store, &state.member_store, &jar).await?;

    let member_id = MemberId::parse(&member_id)
        .map_err(|_| APIError::not_found(NOT_FOUND_MESSAGE))?;

    let member = state
        .member_store
        .read()
        .await
        .get_member(&member_id)
        .await
        .map_err(|e| match e {
            MemberStoreError::MemberNotFound => {
                APIError::not_found(NOT_FOUND_MESSAGE)
            }
            e => APIError::UnexpectedError(eyre!(e)),
        })?;

    Ok((
        StatusCode::OK,
        jar,
        DataResponse::new(MemberRecord::from(&member)),
    ))
}
