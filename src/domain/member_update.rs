use secrecy::Secret;
use serde::Deserialize;

use super::{
    confirms_password, Member, MemberPasswordHash, Password, PasswordField,
    PersonName, Privilege, Profile, Role, Username, ValidationError,
    ValidationErrors,
};

/// Body of `PUT /members/:memberId`. Which fields matter depends on whether
/// the caller is updating their own account.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberUpdateInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub username: Option<String>,
    pub privilege: Option<String>,
    pub curr_password: Option<Secret<String>>,
    pub new_password: Option<Secret<String>>,
    pub confirm_new_password: Option<Secret<String>>,
}

/// Outcome of the profile field rules, one result per field.
#[derive(Debug)]
pub struct ProfileCheck {
    pub first_name: Result<PersonName, ValidationError>,
    pub last_name: Result<PersonName, ValidationError>,
    pub role: Result<Role, ValidationError>,
    pub username: Result<Username, ValidationError>,
}

impl ProfileCheck {
    pub fn parse(
        first_name: Option<String>,
        last_name: Option<String>,
        role: Option<String>,
        username: Option<String>,
    ) -> Self {
        Self {
            first_name: PersonName::parse_first_name(first_name),
            last_name: PersonName::parse_last_name(last_name),
            role: Role::parse(role),
            username: Username::parse(username),
        }
    }

    /// Replaces a well-formed username with the outcome of the uniqueness
    /// lookup.
    pub fn reject_username(&mut self, error: ValidationError) {
        if self.username.is_ok() {
            self.username = Err(error);
        }
    }

    pub fn failures(&self) -> [Option<&ValidationError>; 4] {
        [
            self.first_name.as_ref().err(),
            self.last_name.as_ref().err(),
            self.role.as_ref().err(),
            self.username.as_ref().err(),
        ]
    }

    pub fn into_profile(self) -> Option<Profile> {
        Some(Profile {
            first_name: self.first_name.ok()?,
            last_name: self.last_name.ok()?,
            role: self.role.ok()?,
            username: self.username.ok()?,
        })
    }
}

/// Rules for the optional new password pair. Omitting `newPassword` skips
/// both fields.
#[derive(Debug)]
pub struct NewPasswordCheck {
    pub new_password: Result<Option<Password>, ValidationError>,
    pub confirmation: Result<(), ValidationError>,
}

impl NewPasswordCheck {
    pub fn parse(
        new_password: Option<Secret<String>>,
        confirmation: Option<Secret<String>>,
    ) -> Self {
        let Some(new_password) = new_password else {
            return Self {
                new_password: Ok(None),
                confirmation: Ok(()),
            };
        };

        let confirmed = confirms_password(&new_password, confirmation.as_ref());

        Self {
            new_password: Password::parse(
                Some(new_password),
                PasswordField::NewPassword,
            )
            .map(Some),
            confirmation: if confirmed {
                Ok(())
            } else {
                Err(ValidationError::new(
                    "New Passwords do not match".to_owned(),
                ))
            },
        }
    }
}

/// What the caller is allowed to change, decided before validation.
#[derive(Debug)]
pub enum UpdateAccess {
    /// Updating one's own account. The current password must match and the
    /// privilege field is ignored.
    OwnAccount {
        current_password: Result<(), ValidationError>,
    },
    /// An admin updating another member.
    OtherAccount {
        privilege: Result<Privilege, ValidationError>,
    },
}

/// A member updating their own account.
#[derive(Debug, Clone, PartialEq)]
pub struct SelfUpdateRequest {
    pub profile: Profile,
    pub new_password: Option<Password>,
}

/// An admin updating someone else.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminUpdateRequest {
    pub profile: Profile,
    pub privilege: Privilege,
    pub new_password: Option<Password>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MemberUpdate {
    OwnAccount(SelfUpdateRequest),
    OtherAccount(AdminUpdateRequest),
}

impl MemberUpdate {
    /// Combines the field checks, reporting failures in form order.
    pub fn assemble(
        profile: ProfileCheck,
        passwords: NewPasswordCheck,
        access: UpdateAccess,
    ) -> Result<Self, ValidationErrors> {
        let (current_password, privilege) = match &access {
            UpdateAccess::OwnAccount { current_password } => {
                (current_password.as_ref().err(), None)
            }
            UpdateAccess::OtherAccount { privilege } => {
                (None, privilege.as_ref().err())
            }
        };

        let [first_name, last_name, role, username] = profile.failures();
        ValidationErrors::collect([
            first_name,
            last_name,
            role,
            username,
            passwords.new_password.as_ref().err(),
            passwords.confirmation.as_ref().err(),
            current_password,
            privilege,
        ])
        .into_result()?;

        let (Some(profile), Ok(new_password)) =
            (profile.into_profile(), passwords.new_password)
        else {
            return Err(ValidationErrors::default());
        };

        match access {
            UpdateAccess::OwnAccount { .. } => {
                Ok(Self::OwnAccount(SelfUpdateRequest {
                    profile,
                    new_password,
                }))
            }
            UpdateAccess::OtherAccount { privilege } => {
                let privilege =
                    privilege.map_err(ValidationErrors::from)?;
                Ok(Self::OtherAccount(AdminUpdateRequest {
                    profile,
                    privilege,
                    new_password,
                }))
            }
        }
    }

    pub fn new_password(&self) -> Option<&Password> {
        match self {
            Self::OwnAccount(request) => request.new_password.as_ref(),
            Self::OtherAccount(request) => request.new_password.as_ref(),
        }
    }

    /// Writes the update onto `member`. `hash` is the hash of
    /// [`Self::new_password`] when one was given.
    pub fn apply(self, member: &mut Member, hash: Option<MemberPasswordHash>) {
        match self {
            Self::OwnAccount(request) => {
                member.set_profile(request.profile);
            }
            Self::OtherAccount(request) => {
                member.set_profile(request.profile);
                member.privilege = request.privilege;
            }
        }
        if let Some(hash) = hash {
            member.hash = hash;
        }
    }
}
