use chrono::{DateTime, Utc};
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{
    app_state::MemberStoreType,
    domain::{APIError, Member, MemberId, MemberSet, Privilege},
};

/// A member as sent to clients. The password hash never leaves the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
    #[serde(rename = "_id")]
    pub id: MemberId,
    pub first_name: String,
    pub last_name: String,
    pub date_joined: DateTime<Utc>,
    pub role: String,
    pub privilege: Privilege,
    pub username: String,
}

impl MemberRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl From<&Member> for MemberRecord {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id,
            first_name: member.first_name.as_ref().to_owned(),
            last_name: member.last_name.as_ref().to_owned(),
            date_joined: member.date_joined,
            role: member.role.as_ref().to_owned(),
            privilege: member.privilege,
            username: member.username.as_ref().to_owned(),
        }
    }
}

/// Member reference populated inside projects and tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSummary {
    #[serde(rename = "_id")]
    pub id: MemberId,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
}

impl MemberSummary {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl From<&Member> for MemberSummary {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id,
            first_name: member.first_name.as_ref().to_owned(),
            last_name: member.last_name.as_ref().to_owned(),
            username: member.username.as_ref().to_owned(),
        }
    }
}

/// Summaries of every member, loaded once per request to populate
/// references.
pub struct MemberDirectory(HashMap<MemberId, MemberSummary>);

impl MemberDirectory {
    #[tracing::instrument(name = "Loading member directory", skip_all)]
    pub async fn load(member_store: &MemberStoreType) -> Result<Self, APIError> {
        let members = member_store
            .read()
            .await
            .get_members()
            .await
            .map_err(|e| APIError::UnexpectedError(eyre!(e)))?;

        Ok(Self(
            members
                .iter()
                .map(|m| (m.id, MemberSummary::from(m)))
                .collect(),
        ))
    }

    /// A reference that must resolve.
    pub fn required(&self, id: &MemberId) -> Result<MemberSummary, APIError> {
        self.0.get(id).cloned().ok_or_else(|| {
            APIError::UnexpectedError(eyre!("Referenced member {id} is missing"))
        })
    }

    /// The id in `raw` when it names an existing member.
    pub fn resolve(&self, raw: &str) -> Option<MemberId> {
        MemberId::parse(raw)
            .ok()
            .filter(|id| self.0.contains_key(id))
    }

    /// Every id in `raw`, provided all of them name existing members.
    pub fn resolve_all(&self, raw: &[String]) -> Option<MemberSet> {
        raw.iter().map(|r| self.resolve(r)).collect()
    }

    /// Members of `set` that still exist, in set order.
    pub fn present(&self, set: &MemberSet) -> Vec<MemberSummary> {
        set.iter().filter_map(|id| self.0.get(id).cloned()).collect()
    }
}
