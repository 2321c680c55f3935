use serde::{Deserialize, Serialize};

use super::{
    validation::{escape_html, required_text, TextField, MAX_TEXT_CHARACTERS},
    ValidationError,
};

const FIRST_NAME: TextField =
    TextField::new("First Name", "First name", Some(MAX_TEXT_CHARACTERS));
const LAST_NAME: TextField =
    TextField::new("Last Name", "Last name", Some(MAX_TEXT_CHARACTERS));

/// A first or last name, stored HTML-escaped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonName(String);

impl PersonName {
    pub fn parse_first_name(
        raw: Option<String>,
    ) -> Result<Self, ValidationError> {
        Self::parse(raw, &FIRST_NAME)
    }

    pub fn parse_last_name(raw: Option<String>) -> Result<Self, ValidationError> {
        Self::parse(raw, &LAST_NAME)
    }

    fn parse(
        raw: Option<String>,
        field: &TextField,
    ) -> Result<Self, ValidationError> {
        let name = required_text(raw, field)?;
        Ok(Self(escape_html(&name)))
    }

    /// Wraps a value read back from storage, which was escaped on the way in.
    pub fn from_stored(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<String> for PersonName {
    fn as_ref(&self) -> &String {
        &self.0
    }
}
