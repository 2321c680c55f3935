use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use secrecy::Secret;
use serde::Deserialize;

use crate::{
    app_state::AppState,
    domain::{APIError, MemberStoreError, Password, Username, ValidationErrors},
    utils::auth::{end_session, start_session},
    DataResponse,
};

use super::MemberRecord;

pub const INCORRECT_CREDENTIALS_MESSAGE: &str = "Incorrect username or password";

#[tracing::instrument(name = "Log in", skip_all)]
pub async fn log_in(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LogInRequest>,
) -> Result<(StatusCode, CookieJar, Json<DataResponse<MemberRecord>>), APIError>
{
    let username = Username::parse_credential(request.username);
    let password = Password::parse_credential(request.password);

    let (username, password) = match (username, password) {
        (Ok(username), Ok(password)) => (username, password),
        (username, password) => {
            return Err(ValidationErrors::collect([
                username.as_ref().err(),
                password.as_ref().err(),
            ])
            .into())
        }
    };

    let jar = end_session(&state.session_store, jar)
        .await
        .map_err(APIError::UnexpectedError)?;

    let member = state
        .member_store
        .read()
        .await
        .validate_member(&username, &password)
        .await
        .map_err(|e| match e {
            MemberStoreError::InvalidCredentials
            | MemberStoreError::MemberNotFound => {
                APIError::IncorrectCredentials(
                    INCORRECT_CREDENTIALS_MESSAGE.to_owned(),
                )
            }
            e => APIError::UnexpectedError(eyre!(e)),
        })?;

    let jar = start_session(&state.session_store, jar, &member.id)
        .await
        .map_err(APIError::UnexpectedError)?;

    Ok((
        StatusCode::OK,
        jar,
        DataResponse::new(MemberRecord::from(&member)),
    ))
}

#[derive(Debug, Default, Deserialize)]
pub struct LogInRequest {
    pub username: Option<String>,
    pub password: Option<Secret<String>>,
}
