use serde::{Deserialize, Serialize};

use super::MemberId;

/// Ordered set of member references, as used for project teams and task
/// assignees. Insertion order is kept and duplicates collapse onto their
/// first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MemberSet(Vec<MemberId>);

impl MemberSet {
    /// A copy with `member` appended, unless it is already present.
    pub fn with(&self, member: MemberId) -> Self {
        let mut members = self.0.clone();
        if !members.contains(&member) {
            members.push(member);
        }
        Self(members)
    }

    /// A copy without `member`.
    pub fn without(&self, member: &MemberId) -> Self {
        Self(self.0.iter().filter(|m| *m != member).copied().collect())
    }

    pub fn contains(&self, member: &MemberId) -> bool {
        self.0.contains(member)
    }

    /// True when `member` is the only entry.
    pub fn is_sole(&self, member: &MemberId) -> bool {
        self.0.len() == 1 && self.0[0] == *member
    }

    pub fn iter(&self) -> impl Iterator<Item = &MemberId> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[MemberId] {
        &self.0
    }
}

impl FromIterator<MemberId> for MemberSet {
    fn from_iter<I: IntoIterator<Item = MemberId>>(iter: I) -> Self {
        iter.into_iter()
            .fold(MemberSet::default(), |set, member| set.with(member))
    }
}

impl<'de> Deserialize<'de> for MemberSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let members = Vec::<MemberId>::deserialize(deserializer)?;
        Ok(members.into_iter().collect())
    }
}
