use serde::{Deserialize, Serialize};

use super::{
    validation::{escape_html, required_text, TextField, MAX_TEXT_CHARACTERS},
    ValidationError,
};

const ROLE: TextField = TextField::new("Role", "Role", Some(MAX_TEXT_CHARACTERS));

/// Free text job title of a member ("Developer", "QA", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    pub fn parse(raw: Option<String>) -> Result<Self, ValidationError> {
        let role = required_text(raw, &ROLE)?;
        Ok(Self(escape_html(&role)))
    }

    pub fn from_stored(role: String) -> Self {
        Self(role)
    }
}

impl AsRef<String> for Role {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

#[test]
fn test_roles() {
    assert_eq!(
        Role::parse(Some("Developer".to_owned())).unwrap().as_ref(),
        "Developer"
    );
    assert_eq!(
        Role::parse(Some("".to_owned())).unwrap_err().as_ref(),
        "Role cannot be blank"
    );
    assert_eq!(
        Role::parse(Some("r".repeat(101))).unwrap_err().as_ref(),
        "Role cannot be longer than 100 characters"
    );
}
