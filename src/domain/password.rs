use super::{
    validation::{contains_forbidden_characters, forbidden_characters_message},
    ValidationError,
};
use secrecy::{ExposeSecret, Secret};

const MIN_CHARACTERS: usize = 8;
const MAX_CHARACTERS: usize = 15;

/// Which password input is being checked; only changes the messages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PasswordField {
    Password,
    NewPassword,
}

impl PasswordField {
    fn label(&self) -> &'static str {
        match self {
            PasswordField::Password => "Password",
            PasswordField::NewPassword => "New Password",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Password {
    /// Strength and character rules applied when a password is chosen.
    pub fn parse(
        raw: Option<Secret<String>>,
        field: PasswordField,
    ) -> Result<Password, ValidationError> {
        let label = field.label();
        let raw = raw.ok_or_else(|| {
            ValidationError::new(format!("Invalid value for {label}"))
        })?;
        let trimmed = raw.expose_secret().trim().to_owned();
        validate_password(&trimmed, label)?;
        Ok(Self(Secret::new(trimmed)))
    }

    /// A password typed at log-in. Only presence is checked.
    pub fn parse_credential(
        raw: Option<Secret<String>>,
    ) -> Result<Password, ValidationError> {
        let raw = raw.ok_or_else(|| {
            ValidationError::new("Invalid value for Password".to_owned())
        })?;
        let trimmed = raw.expose_secret().trim().to_owned();
        if trimmed.is_empty() {
            return Err(ValidationError::new(
                "Please enter a Password".to_owned(),
            ));
        }
        Ok(Self(Secret::new(trimmed)))
    }
}

/// True when `confirmation`, taken as typed, equals the trimmed `password`.
pub fn confirms_password(
    password: &Secret<String>,
    confirmation: Option<&Secret<String>>,
) -> bool {
    confirmation
        .map(|c| c.expose_secret() == password.expose_secret().trim())
        .unwrap_or(false)
}

fn validate_password(s: &str, label: &str) -> Result<(), ValidationError> {
    let char_count = s.chars().count();

    if char_count == 0 {
        return Err(ValidationError::new(format!("{label} cannot be blank")));
    }

    if char_count < MIN_CHARACTERS {
        return Err(ValidationError::new(format!(
            "{label} cannot be shorter than {MIN_CHARACTERS} characters"
        )));
    }

    if char_count > MAX_CHARACTERS {
        return Err(ValidationError::new(format!(
            "{label} cannot be longer than {MAX_CHARACTERS} characters"
        )));
    }

    let has_lowercase = s.chars().any(|c| c.is_ascii_lowercase());
    let has_uppercase = s.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = s.chars().any(|c| c.is_ascii_digit());

    if !(has_lowercase && has_uppercase && has_digit) {
        return Err(ValidationError::new(format!(
            "{label} must contain at least 1 lowercase letter, 1 uppercase letter, and 1 number"
        )));
    }

    if contains_forbidden_characters(s) {
        return Err(ValidationError::new(forbidden_characters_message(label)));
    }

    Ok(())
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
