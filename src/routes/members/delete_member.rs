use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;

use crate::{
    app_state::AppState,
    domain::{find_deletion_blockers, APIError, MemberId, MemberStoreError},
    utils::auth::current_member,
    DataResponse,
};

use super::MemberRecord;

const NOT_FOUND_MESSAGE: &str = "Cannot delete member: Member not found";

#[tracing::instrument(name = "Delete member", skip_all)]
pub async fn delete_member(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(member_id): Path<String>,
) -> Result<(StatusCode, CookieJar, Json<DataResponse<MemberRecord>>), APIError>
{
    let acting =
        current_member(&state.session_store, &state.member_store, &jar).await?;
    if !acting.is_admin() {
        return Err(APIError::Forbidden);
    }

    let member_id = MemberId::parse(&member_id)
        .map_err(|_| APIError::not_found(NOT_FOUND_MESSAGE))?;

    let not_found_or_unexpected = |e: MemberStoreError| match e {
        MemberStoreError::MemberNotFound => APIError::not_found(NOT_FOUND_MESSAGE),
        e => APIError::UnexpectedError(eyre!(e)),
    };

    state
        .member_store
        .read()
        .await
        .get_member(&member_id)
        .await
        .map_err(not_found_or_unexpected)?;

    let blockers = {
        let project_store = state.project_store.read().await;
        let task_store = state.task_store.read().await;
        find_deletion_blockers(&*project_store, &*task_store, &member_id)
            .await
            .map_err(APIError::UnexpectedError)?
    };
    blockers.into_result()?;

    let member = state
        .member_store
        .write()
        .await
        .delete_member(&member_id)
        .await
        .map_err(not_found_or_unexpected)?;

    state
        .session_store
        .write()
        .await
        .remove_sessions_for_member(&member_id)
        .await
        .map_err(|e| APIError::UnexpectedError(eyre!(e)))?;

    Ok((
        StatusCode::OK,
        jar,
        DataResponse::new(MemberRecord::from(&member)),
    ))
}
