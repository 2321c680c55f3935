use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;

use crate::{
    app_state::AppState, domain::APIError, utils::auth::current_member,
    DataResponse,
};

use super::MemberRecord;

#[tracing::instrument(name = "Get current member", skip_all)]
pub async fn curr_user(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(StatusCode, CookieJar, Json<DataResponse<MemberRecord>>), APIError>
{
    let member =
        current_member(&state.session_store, &state.member_store, &jar).await?;

    Ok((
        StatusCode::OK,
        jar,
        DataResponse::new(MemberRecord::from(&member)),
    ))
}
