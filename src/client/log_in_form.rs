use secrecy::Secret;

use crate::routes::members::MemberRecord;

use super::{ApiClient, Credentials, Navigation};

/// Log-in form state. [`LogInForm::submit`] only flags the form;
/// [`LogInForm::run_pending`] performs the flagged request.
#[derive(Debug, Default)]
pub struct LogInForm {
    pub username: String,
    pub password: Option<Secret<String>>,
    submitting: bool,
    errors: Vec<String>,
    session: Option<(Credentials, MemberRecord)>,
}

impl LogInForm {
    pub fn submit(&mut self) {
        self.submitting = true;
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Credentials and member of a successful log-in.
    pub fn session(&self) -> Option<&(Credentials, MemberRecord)> {
        self.session.as_ref()
    }

    #[tracing::instrument(name = "Running log-in form", skip_all)]
    pub async fn run_pending(&mut self, client: &ApiClient) -> Option<Navigation> {
        if !self.submitting {
            return None;
        }

        let password = self
            .password
            .clone()
            .unwrap_or_else(|| Secret::new(String::new()));
        let outcome = client.log_in(&self.username, &password).await;
        self.submitting = false;

        match outcome {
            Ok(session) => {
                self.session = Some(session);
                self.errors.clear();
                Some(Navigation::Home { refresh: true })
            }
            Err(e) => {
                self.errors = e.messages();
                None
            }
        }
    }
}
