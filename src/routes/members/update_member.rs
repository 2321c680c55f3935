use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use secrecy::{ExposeSecret, Secret};

use crate::{
    app_state::AppState,
    domain::{
        APIError, Member, MemberId, MemberPasswordHash, MemberStoreError,
        MemberUpdate, MemberUpdateInput, NewPasswordCheck, Privilege,
        ProfileCheck, UpdateAccess, ValidationError, USERNAME_TAKEN_MESSAGE,
    },
    utils::auth::current_member,
    DataResponse,
};

use super::{sign_up::check_username_available, MemberRecord};

const NOT_FOUND_MESSAGE: &str = "Cannot update member: Member not found";

#[tracing::instrument(name = "Update member", skip_all)]
pub async fn update_member(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(member_id): Path<String>,
    Json(request): Json<MemberUpdateInput>,
) -> Result<(StatusCode, CookieJar, Json<DataResponse<MemberRecord>>), APIError>
{
    let acting =
        current_member(&state.session_store, &state.member_store, &jar).await?;

    let target_id = MemberId::parse(&member_id).ok();
    let own_account = target_id == Some(acting.id);
    if !own_account && !acting.is_admin() {
        return Err(APIError::Forbidden);
    }
    let target_id =
        target_id.ok_or_else(|| APIError::not_found(NOT_FOUND_MESSAGE))?;

    let mut target = if own_account {
        acting
    } else {
        state
            .member_store
            .read()
            .await
            .get_member(&target_id)
            .await
            .map_err(|e| match e {
                MemberStoreError::MemberNotFound => {
                    APIError::not_found(NOT_FOUND_MESSAGE)
                }
                e => APIError::UnexpectedError(eyre!(e)),
            })?
    };

    let mut profile = ProfileCheck::parse(
        request.first_name,
        request.last_name,
        request.role,
        request.username,
    );
    check_username_available(&state, &mut profile, Some(&target.id)).await;

    let passwords = NewPasswordCheck::parse(
        request.new_password,
        request.confirm_new_password,
    );

    let access = if own_account {
        UpdateAccess::OwnAccount {
            current_password: check_current_password(
                &target,
                request.curr_password,
            )
            .await,
        }
    } else {
        UpdateAccess::OtherAccount {
            privilege: Privilege::parse(request.privilege),
        }
    };

    let update = MemberUpdate::assemble(profile, passwords, access)?;

    let hash = match update.new_password() {
        Some(password) => Some(
            MemberPasswordHash::from_password(password)
                .await
                .map_err(APIError::UnexpectedError)?,
        ),
        None => None,
    };
    update.apply(&mut target, hash);

    state
        .member_store
        .write()
        .await
        .update_member(target.clone())
        .await
        .map_err(|e| match e {
            MemberStoreError::MemberNotFound => {
                APIError::not_found(NOT_FOUND_MESSAGE)
            }
            MemberStoreError::UsernameTaken => APIError::from(
                ValidationError::new(USERNAME_TAKEN_MESSAGE.to_owned()),
            ),
            e => APIError::UnexpectedError(eyre!(e)),
        })?;

    Ok((
        StatusCode::OK,
        jar,
        DataResponse::new(MemberRecord::from(&target)),
    ))
}

/// Own-account updates must repeat the current password, even when the
/// password itself is not being changed.
#[tracing::instrument(name = "Checking current password", skip_all)]
async fn check_current_password(
    member: &Member,
    candidate: Option<Secret<String>>,
) -> Result<(), ValidationError> {
    let incorrect = || ValidationError::new("Incorrect password".to_owned());

    let candidate = candidate
        .filter(|c| !c.expose_secret().is_empty())
        .ok_or_else(incorrect)?;

    member.hash.verify(&candidate).await.map_err(|_| incorrect())
}
