use color_eyre::eyre::Report;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum APIError {
    #[error("Forbidden")]
    Forbidden,
    #[error("Incorrect credentials: {0}")]
    IncorrectCredentials(String),
    #[error("Not found")]
    NotFound(Option<String>),
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
    #[error("Validation error")]
    ValidationError(#[from] ValidationErrors),
}

impl APIError {
    pub fn not_found(message: &str) -> Self {
        Self::NotFound(Some(message.to_owned()))
    }
}

impl From<ValidationError> for APIError {
    fn from(error: ValidationError) -> Self {
        Self::ValidationError(error.into())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("Validation error: {0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: String) -> Self {
        Self(message)
    }

    pub fn as_ref(&self) -> &String {
        &self.0
    }
}

/// Failed rules of a request, one message per field in field order.
#[derive(Debug, Clone, Default, PartialEq, Error)]
#[error("Validation errors: {}", .0.join(" | "))]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    pub fn collect<'a>(
        failures: impl IntoIterator<Item = Option<&'a ValidationError>>,
    ) -> Self {
        Self(
            failures
                .into_iter()
                .flatten()
                .map(|e| e.as_ref().to_owned())
                .collect(),
        )
    }

    pub fn from_messages(messages: Vec<String>) -> Self {
        Self(messages)
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error.0])
    }
}
