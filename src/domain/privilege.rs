use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    validation::{one_of, TextField},
    ValidationError,
};

const PRIVILEGE: TextField = TextField::new("Privilege", "Privilege", None);

/// Gates admin-only operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Privilege {
    Admin,
    User,
}

impl Privilege {
    pub fn parse(raw: Option<String>) -> Result<Self, ValidationError> {
        let value = one_of(raw, &PRIVILEGE, &["admin", "user"])?;
        Self::try_from(value.as_str())
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Privilege::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Privilege::Admin => "admin",
            Privilege::User => "user",
        }
    }
}

impl TryFrom<&str> for Privilege {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "admin" => Ok(Privilege::Admin),
            "user" => Ok(Privilege::User),
            _ => Err(PRIVILEGE.invalid_value()),
        }
    }
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
