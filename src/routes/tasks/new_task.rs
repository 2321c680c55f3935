use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;

use crate::{
    app_state::AppState,
    domain::{APIError, Task},
    routes::members::MemberDirectory,
    utils::auth::current_member,
    DataResponse,
};

use super::{parse_task_fields, TaskRecord, TaskRequest};

#[tracing::instrument(name = "Create new task", skip_all)]
pub async fn new_task(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<TaskRequest>,
) -> Result<(StatusCode, CookieJar, Json<DataResponse<TaskRecord>>), APIError> {
    let acting =
        current_member(&state.session_store, &state.member_store, &jar).await?;

    let members = MemberDirectory::load(&state.member_store).await?;
    let fields = parse_task_fields(&state, request, &members).await?;
    let task = Task::new(fields, acting.id);

    state
        .task_store
        .write()
        .await
        .add_task(task.clone())
        .await
        .map_err(|e| APIError::UnexpectedError(eyre!(e)))?;

    let record = TaskRecord::populate(&task, &members)?;

    Ok((StatusCode::CREATED, jar, DataResponse::new(record)))
}
