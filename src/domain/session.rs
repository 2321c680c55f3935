use rand::{distributions::Alphanumeric, Rng};
use secrecy::{ExposeSecret, Secret};

const TOKEN_LENGTH: usize = 48;

/// Opaque value of the session cookie.
#[derive(Debug, Clone)]
pub struct SessionToken(Secret<String>);

impl PartialEq for SessionToken {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for SessionToken {}

impl std::hash::Hash for SessionToken {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.expose_secret().hash(state);
    }
}

impl SessionToken {
    /// Wraps a token presented by a client. Unknown tokens simply find no
    /// session, so nothing beyond non-emptiness is checked.
    pub fn parse(token: Secret<String>) -> Option<Self> {
        if token.expose_secret().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }
}

impl Default for SessionToken {
    fn default() -> Self {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LENGTH)
            .map(char::from)
            .collect();
        Self(Secret::new(token))
    }
}

impl AsRef<Secret<String>> for SessionToken {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
