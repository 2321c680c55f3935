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

use super::{parse_task_id, task_store_error, TaskRecord};

#[tracing::instrument(name = "Get task", skip_all)]
pub async fn get_task(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(task_id): Path<String>,
) -> Result<(StatusCode, CookieJar, Json<DataResponse<TaskRecord>>), APIError> {
    current_member(&state.session_store, &state.member_store, &jar).await?;
    let task_id = parse_task_id(&task_id)?;

    let task = state
        .task_store
        .read()
        .await
        .get_task(&task_id)
        .await
        .map_err(task_store_error)?;

    let members = MemberDirectory::load(&state.member_store).await?;
    let record = TaskRecord::populate(&task, &members)?;

    Ok((StatusCode::OK, jar, DataResponse::new(record)))
}
