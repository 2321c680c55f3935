use std::collections::HashMap;

use crate::domain::{
    MemberId, SessionStore, SessionStoreError, SessionToken,
};

#[derive(Default)]
pub struct HashmapSessionStore {
    sessions: HashMap<SessionToken, MemberId>,
}

#[async_trait::async_trait]
impl SessionStore for HashmapSessionStore {
    async fn add_session(
        &mut self,
        token: SessionToken,
        member: MemberId,
    ) -> Result<(), SessionStoreError> {
        self.sessions.insert(token, member);
        Ok(())
    }

    async fn get_session(
        &self,
        token: &SessionToken,
    ) -> Result<MemberId, SessionStoreError> {
        self.sessions
            .get(token)
            .copied()
            .ok_or(SessionStoreError::SessionNotFound)
    }

    async fn remove_session(
        &mut self,
        token: &SessionToken,
    ) -> Result<(), SessionStoreError> {
        self.sessions.remove(token);
        Ok(())
    }

    async fn remove_sessions_for_member(
        &mut self,
        member: &MemberId,
    ) -> Result<(), SessionStoreError> {
        self.sessions.retain(|_, m| m != member);
        Ok(())
    }
}
