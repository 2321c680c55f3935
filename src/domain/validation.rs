use lazy_static::lazy_static;
use regex::Regex;

use super::ValidationError;

lazy_static! {
    static ref FORBIDDEN_CHARACTERS: Regex =
        Regex::new(r#"[<>&'"/]"#).expect("forbidden character regex is valid");
}

pub const MAX_TEXT_CHARACTERS: u64 = 100;

/// Labels used when building messages for a free text field.
///
/// `field` is the form label ("First Name") used for type errors, `subject`
/// starts the sentence of every other message ("First name cannot be blank").
#[derive(Debug, Clone, Copy)]
pub struct TextField {
    pub field: &'static str,
    pub subject: &'static str,
    pub max_characters: Option<u64>,
}

impl TextField {
    pub const fn new(
        field: &'static str,
        subject: &'static str,
        max_characters: Option<u64>,
    ) -> Self {
        Self {
            field,
            subject,
            max_characters,
        }
    }

    pub fn invalid_value(&self) -> ValidationError {
        ValidationError::new(format!("Invalid value for {}", self.field))
    }
}

/// Present, trimmed, non-blank and within the length bound.
pub fn required_text(
    raw: Option<String>,
    field: &TextField,
) -> Result<String, ValidationError> {
    let raw = raw.ok_or_else(|| field.invalid_value())?;
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::new(format!(
            "{} cannot be blank",
            field.subject
        )));
    }

    if let Some(max) = field.max_characters {
        if !validator::validate_length(trimmed, None, Some(max), None) {
            return Err(ValidationError::new(format!(
                "{} cannot be longer than {} characters",
                field.subject, max
            )));
        }
    }

    Ok(trimmed.to_owned())
}

/// Present, trimmed, non-blank and one of `allowed`.
pub fn one_of(
    raw: Option<String>,
    field: &TextField,
    allowed: &[&str],
) -> Result<String, ValidationError> {
    let value = required_text(raw, field)?;
    if allowed.contains(&value.as_str()) {
        Ok(value)
    } else {
        Err(field.invalid_value())
    }
}

pub fn contains_forbidden_characters(value: &str) -> bool {
    FORBIDDEN_CHARACTERS.is_match(value)
}

pub fn forbidden_characters_message(subject: &str) -> String {
    format!(
        "{} cannot contain the following characters: <, >, &, ', \", /",
        subject
    )
}

/// HTML-escapes user supplied display text before it is stored.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '/' => escaped.push_str("&#x2F;"),
            '\\' => escaped.push_str("&#x5C;"),
            '`' => escaped.push_str("&#96;"),
            c => escaped.push(c),
        }
    }
    escaped
}
