use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use serde_json::{json, Value};

use crate::{app_state::AppState, domain::APIError, utils::auth::end_session};

#[tracing::instrument(name = "Log out", skip_all)]
pub async fn log_out(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(StatusCode, CookieJar, Json<Value>), APIError> {
    let jar = end_session(&state.session_store, jar)
        .await
        .map_err(APIError::UnexpectedError)?;

    Ok((StatusCode::OK, jar, Json(json!({}))))
}
