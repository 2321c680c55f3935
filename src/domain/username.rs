use serde::{Deserialize, Serialize};

use super::{
    validation::{
        contains_forbidden_characters, forbidden_characters_message,
        required_text, TextField, MAX_TEXT_CHARACTERS,
    },
    ValidationError,
};

const USERNAME: TextField =
    TextField::new("Username", "Username", Some(MAX_TEXT_CHARACTERS));

pub const USERNAME_TAKEN_MESSAGE: &str =
    "Username is already in use. Please enter a different username";
pub const USERNAME_CHECK_FAILED_MESSAGE: &str =
    "Error in checking uniqueness of username. Please try again later, or report the issue.";

/// Log-in name. Compared case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    pub fn parse(raw: Option<String>) -> Result<Self, ValidationError> {
        let username = required_text(raw, &USERNAME)?;
        if contains_forbidden_characters(&username) {
            return Err(ValidationError::new(forbidden_characters_message(
                USERNAME.subject,
            )));
        }
        Ok(Self(username))
    }

    /// Log-in only requires a non-blank value; the lookup does the rest.
    pub fn parse_credential(
        raw: Option<String>,
    ) -> Result<Self, ValidationError> {
        let raw = raw.ok_or_else(|| USERNAME.invalid_value())?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::new(
                "Please enter a Username".to_owned(),
            ));
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn from_stored(username: String) -> Self {
        Self(username)
    }
}

impl AsRef<String> for Username {
    fn as_ref(&self) -> &String {
        &self.0
    }
}
