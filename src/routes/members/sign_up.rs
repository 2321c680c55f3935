use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use secrecy::Secret;
use serde::Deserialize;

use crate::{
    app_state::AppState,
    domain::{
        confirms_password, APIError, Member, MemberId, MemberPasswordHash,
        MemberStoreError, Password, PasswordField, Privilege, ProfileCheck,
        ValidationError, ValidationErrors, USERNAME_CHECK_FAILED_MESSAGE,
        USERNAME_TAKEN_MESSAGE,
    },
    utils::auth::{end_session, start_session},
    DataResponse,
};

use super::MemberRecord;

#[tracing::instrument(name = "Sign up", skip_all)]
pub async fn sign_up(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<SignUpRequest>,
) -> Result<(StatusCode, CookieJar, Json<DataResponse<MemberRecord>>), APIError>
{
    let mut profile = ProfileCheck::parse(
        request.first_name,
        request.last_name,
        request.role,
        request.username,
    );
    check_username_available(&state, &mut profile, None).await;
    let privilege = Privilege::parse(request.privilege);
    let confirmed = request.password.as_ref().is_some_and(|password| {
        confirms_password(password, request.confirm_password.as_ref())
    });
    let confirmation = if confirmed {
        Ok(())
    } else {
        Err(ValidationError::new("Passwords do not match".to_owned()))
    };
    let password = Password::parse(request.password, PasswordField::Password);

    let [first_name, last_name, role, username] = profile.failures();
    let errors = ValidationErrors::collect([
        first_name,
        last_name,
        role,
        privilege.as_ref().err(),
        username,
        password.as_ref().err(),
        confirmation.as_ref().err(),
    ]);

    let (profile, privilege, password) =
        match (profile.into_profile(), privilege, password, confirmation) {
            (Some(profile), Ok(privilege), Ok(password), Ok(())) => {
                (profile, privilege, password)
            }
            _ => return Err(errors.into()),
        };

    let jar = end_session(&state.session_store, jar)
        .await
        .map_err(APIError::UnexpectedError)?;

    let hash = MemberPasswordHash::from_password(&password)
        .await
        .map_err(APIError::UnexpectedError)?;
    let member = Member::new(profile, privilege, hash);

    state
        .member_store
        .write()
        .await
        .add_member(member.clone())
        .await
        .map_err(|e| match e {
            MemberStoreError::UsernameTaken => APIError::from(
                ValidationError::new(USERNAME_TAKEN_MESSAGE.to_owned()),
            ),
            e => APIError::UnexpectedError(eyre!(e)),
        })?;

    let jar = start_session(&state.session_store, jar, &member.id)
        .await
        .map_err(APIError::UnexpectedError)?;

    Ok((
        StatusCode::CREATED,
        jar,
        DataResponse::new(MemberRecord::from(&member)),
    ))
}

/// Replaces a well-formed username with a failure when another member
/// already holds it.
#[tracing::instrument(name = "Checking username uniqueness", skip_all)]
pub(super) async fn check_username_available(
    state: &AppState,
    profile: &mut ProfileCheck,
    excluding: Option<&MemberId>,
) {
    let Ok(username) = &profile.username else {
        return;
    };

    let taken = state
        .member_store
        .read()
        .await
        .username_taken(username, excluding)
        .await;

    match taken {
        Ok(false) => (),
        Ok(true) => profile.reject_username(ValidationError::new(
            USERNAME_TAKEN_MESSAGE.to_owned(),
        )),
        Err(e) => {
            tracing::warn!("Username uniqueness check failed: {e:?}");
            profile.reject_username(ValidationError::new(
                USERNAME_CHECK_FAILED_MESSAGE.to_owned(),
            ))
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub privilege: Option<String>,
    pub username: Option<String>,
    pub password: Option<Secret<String>>,
    pub confirm_password: Option<Secret<String>>,
}
