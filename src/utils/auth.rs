use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use color_eyre::eyre::{eyre, Result};
use secrecy::{ExposeSecret, Secret};

use crate::{
    app_state::{MemberStoreType, SessionStoreType},
    domain::{
        APIError, Member, MemberId, MemberStoreError, SessionStoreError,
        SessionToken,
    },
};

use super::constants::SESSION_COOKIE_NAME;

// How long a session stays valid without logging in again
pub const SESSION_TTL_SECONDS: i64 = 86_400; // 24 hours

#[tracing::instrument(name = "Creating session cookie", skip_all)]
fn create_session_cookie(token: &SessionToken) -> Cookie<'static> {
    Cookie::build((
        SESSION_COOKIE_NAME,
        token.as_ref().expose_secret().to_owned(),
    ))
    .path("/")
    .http_only(true)
    .same_site(SameSite::Lax)
    .build()
}

/// The session token carried by the request, if any.
pub fn session_token(jar: &CookieJar) -> Option<SessionToken> {
    jar.get(SESSION_COOKIE_NAME)
        .and_then(|c| SessionToken::parse(Secret::new(c.value().to_owned())))
}

/// Stores a fresh session for `member` and sets its cookie.
#[tracing::instrument(name = "Starting session", skip_all)]
pub async fn start_session(
    session_store: &SessionStoreType,
    jar: CookieJar,
    member: &MemberId,
) -> Result<CookieJar> {
    let token = SessionToken::default();
    session_store
        .write()
        .await
        .add_session(token.clone(), *member)
        .await?;

    Ok(jar.add(create_session_cookie(&token)))
}

/// Destroys the caller's session, if there is one, and clears the cookie.
#[tracing::instrument(name = "Ending session", skip_all)]
pub async fn end_session(
    session_store: &SessionStoreType,
    jar: CookieJar,
) -> Result<CookieJar> {
    let Some(token) = session_token(&jar) else {
        return Ok(jar);
    };

    session_store.write().await.remove_session(&token).await?;

    Ok(jar.remove(Cookie::build(SESSION_COOKIE_NAME).path("/")))
}

/// The member behind the request's session.
///
/// A missing, expired or orphaned session is reported as a bare 404 rather
/// than 401 so that protected routes look absent to anonymous callers.
#[tracing::instrument(name = "Resolving current member", skip_all)]
pub async fn current_member(
    session_store: &SessionStoreType,
    member_store: &MemberStoreType,
    jar: &CookieJar,
) -> Result<Member, APIError> {
    let token = session_token(jar).ok_or(APIError::NotFound(None))?;

    let member_id = session_store
        .read()
        .await
        .get_session(&token)
        .await
        .map_err(|e| match e {
            SessionStoreError::SessionNotFound => APIError::NotFound(None),
            e => APIError::UnexpectedError(eyre!(e)),
        })?;

    member_store
        .read()
        .await
        .get_member(&member_id)
        .await
        .map_err(|e| match e {
            MemberStoreError::MemberNotFound => APIError::NotFound(None),
            e => APIError::UnexpectedError(eyre!(e)),
        })
}
