use chrono::{DateTime, Utc};

use super::{
    MemberId, MemberPasswordHash, PersonName, Privilege, Role, Username,
};

/// Validated profile fields shared by sign-up and member updates.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub role: Role,
    pub username: Username,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: MemberId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub date_joined: DateTime<Utc>,
    pub role: Role,
    pub privilege: Privilege,
    pub username: Username,
    pub hash: MemberPasswordHash,
}

impl Member {
    /// A member joining now.
    pub fn new(
        profile: Profile,
        privilege: Privilege,
        hash: MemberPasswordHash,
    ) -> Self {
        Self {
            id: MemberId::default(),
            first_name: profile.first_name,
            last_name: profile.last_name,
            date_joined: Utc::now(),
            role: profile.role,
            privilege,
            username: profile.username,
            hash,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.privilege.is_admin()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.as_ref(), self.last_name.as_ref())
    }

    pub fn set_profile(&mut self, profile: Profile) {
        self.first_name = profile.first_name;
        self.last_name = profile.last_name;
        self.role = profile.role;
        self.username = profile.username;
    }
}
