use crate::domain::{
    Member, MemberId, MemberStore, MemberStoreError, Password, Username,
};
use std::collections::HashMap;

#[derive(Default)]
pub struct HashmapMemberStore {
    members: HashMap<MemberId, Member>,
    join_order: Vec<MemberId>,
}

impl HashmapMemberStore {
    fn find_by_username(&self, username: &Username) -> Option<&Member> {
        self.members.values().find(|m| &m.username == username)
    }
}

#[async_trait::async_trait]
impl MemberStore for HashmapMemberStore {
    async fn add_member(
        &mut self,
        member: Member,
    ) -> Result<(), MemberStoreError> {
        if self.find_by_username(&member.username).is_some() {
            return Err(MemberStoreError::UsernameTaken);
        }

        self.join_order.push(member.id);
        self.members.insert(member.id, member);
        Ok(())
    }

    async fn get_member(
        &self,
        id: &MemberId,
    ) -> Result<Member, MemberStoreError> {
        match self.members.get(id) {
            Some(member) => Ok(member.clone()),
            None => Err(MemberStoreError::MemberNotFound),
        }
    }

    async fn get_member_by_username(
        &self,
        username: &Username,
    ) -> Result<Member, MemberStoreError> {
        self.find_by_username(username)
            .cloned()
            .ok_or(MemberStoreError::MemberNotFound)
    }

    async fn get_members(&self) -> Result<Vec<Member>, MemberStoreError> {
        Ok(self
            .join_order
            .iter()
            .filter_map(|id| self.members.get(id).cloned())
            .collect())
    }

    async fn username_taken(
        &self,
        username: &Username,
        excluding: Option<&MemberId>,
    ) -> Result<bool, MemberStoreError> {
        Ok(self
            .members
            .values()
            .any(|m| &m.username == username && Some(&m.id) != excluding))
    }

    async fn update_member(
        &mut self,
        member: Member,
    ) -> Result<(), MemberStoreError> {
        if !self.members.contains_key(&member.id) {
            return Err(MemberStoreError::MemberNotFound);
        }
        if self.username_taken(&member.username, Some(&member.id)).await? {
            return Err(MemberStoreError::UsernameTaken);
        }

        self.members.insert(member.id, member);
        Ok(())
    }

    async fn delete_member(
        &mut self,
        id: &MemberId,
    ) -> Result<Member, MemberStoreError> {
        match self.members.remove(id) {
            Some(member) => {
                self.join_order.retain(|m| m != id);
                Ok(member)
            }
            None => Err(MemberStoreError::MemberNotFound),
        }
    }

    async fn validate_member(
        &self,
        username: &Username,
        password: &Password,
    ) -> Result<Member, MemberStoreError> {
        let member = self.get_member_by_username(username).await?;
        member
            .hash
            .verify(password.as_ref())
            .await
            .map_err(|_| MemberStoreError::InvalidCredentials)?;
        Ok(member)
    }
}
