use color_eyre::eyre::{eyre, WrapErr};
use redis::{Commands, Connection};
use secrecy::ExposeSecret;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    domain::{MemberId, SessionStore, SessionStoreError, SessionToken},
    utils::auth::SESSION_TTL_SECONDS,
};

pub struct RedisSessionStore {
    conn: Arc<RwLock<Connection>>,
}

impl RedisSessionStore {
    pub fn new(conn: Arc<RwLock<Connection>>) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl SessionStore for RedisSessionStore {
    #[tracing::instrument(name = "Adding session to Redis", skip_all)]
    async fn add_session(
        &mut self,
        token: SessionToken,
        member: MemberId,
    ) -> Result<(), SessionStoreError> {
        let ttl_seconds: u64 = SESSION_TTL_SECONDS
            .try_into()
            .wrap_err("failed to cast SESSION_TTL_SECONDS to u64")
            .map_err(SessionStoreError::UnexpectedError)?;
        let member_key = get_member_key(&member);

        let mut conn = self.conn.write().await;
        conn.set_ex::<_, _, ()>(
            get_session_key(&token),
            member.to_string(),
            ttl_seconds,
        )
        .wrap_err("failed to set session in Redis")
        .map_err(SessionStoreError::UnexpectedError)?;

        conn.sadd::<_, _, ()>(&member_key, token.as_ref().expose_secret())
            .wrap_err("failed to index session by member in Redis")
            .map_err(SessionStoreError::UnexpectedError)?;
        conn.expire::<_, ()>(&member_key, SESSION_TTL_SECONDS)
            .wrap_err("failed to set expiry of member session index")
            .map_err(SessionStoreError::UnexpectedError)?;

        Ok(())
    }

    #[tracing::instrument(name = "Getting session from Redis", skip_all)]
    async fn get_session(
        &self,
        token: &SessionToken,
    ) -> Result<MemberId, SessionStoreError> {
        let key = get_session_key(token);
        match self.conn.write().await.get::<_, Option<String>>(&key) {
            Ok(Some(member)) => MemberId::parse(&member)
                .map_err(|e| SessionStoreError::UnexpectedError(eyre!(e))),
            Ok(None) => Err(SessionStoreError::SessionNotFound),
            Err(e) => Err(SessionStoreError::UnexpectedError(
                eyre!(e).wrap_err("failed to get session from Redis"),
            )),
        }
    }

    #[tracing::instrument(name = "Removing session from Redis", skip_all)]
    async fn remove_session(
        &mut self,
        token: &SessionToken,
    ) -> Result<(), SessionStoreError> {
        let key = get_session_key(token);
        let mut conn = self.conn.write().await;

        let member: Option<String> = conn
            .get(&key)
            .wrap_err("failed to get session from Redis")
            .map_err(SessionStoreError::UnexpectedError)?;

        conn.del::<_, ()>(&key)
            .wrap_err("failed to delete session from Redis")
            .map_err(SessionStoreError::UnexpectedError)?;

        if let Some(member) = member.and_then(|m| MemberId::parse(&m).ok()) {
            conn.srem::<_, _, ()>(
                get_member_key(&member),
                token.as_ref().expose_secret(),
            )
            .wrap_err("failed to unindex session in Redis")
            .map_err(SessionStoreError::UnexpectedError)?;
        }

        Ok(())
    }

    #[tracing::instrument(
        name = "Removing all sessions of member from Redis",
        skip_all
    )]
    async fn remove_sessions_for_member(
        &mut self,
        member: &MemberId,
    ) -> Result<(), SessionStoreError> {
        let member_key = get_member_key(member);
        let mut conn = self.conn.write().await;

        let tokens: Vec<String> = conn
            .smembers(&member_key)
            .wrap_err("failed to list member sessions in Redis")
            .map_err(SessionStoreError::UnexpectedError)?;

        for token in tokens {
            conn.del::<_, ()>(format!("{}{}", SESSION_KEY_PREFIX, token))
                .wrap_err("failed to delete session from Redis")
                .map_err(SessionStoreError::UnexpectedError)?;
        }

        conn.del::<_, ()>(&member_key)
            .wrap_err("failed to delete member session index from Redis")
            .map_err(SessionStoreError::UnexpectedError)?;

        Ok(())
    }
}

const SESSION_KEY_PREFIX: &str = "session:";
const MEMBER_SESSIONS_KEY_PREFIX: &str = "member_sessions:";

fn get_session_key(token: &SessionToken) -> String {
    format!("{}{}", SESSION_KEY_PREFIX, token.as_ref().expose_secret())
}

fn get_member_key(member: &MemberId) -> String {
    format!("{}{}", MEMBER_SESSIONS_KEY_PREFIX, member)
}
