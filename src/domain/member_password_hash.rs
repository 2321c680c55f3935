use super::Password;
use argon2::{
    password_hash::SaltString, Algorithm, Argon2, Params, PasswordHash,
    PasswordHasher, PasswordVerifier, Version,
};
use color_eyre::eyre::{Result, WrapErr};
use secrecy::{ExposeSecret, Secret};

// Argon2id with m=15000 KiB, t=2, p=1.
const MEMORY_COST_KIB: u32 = 15_000;
const ITERATIONS: u32 = 2;
const PARALLELISM: u32 = 1;

/// Argon2id PHC string of a member's password. Never leaves the server.
#[derive(Debug, Clone)]
pub struct MemberPasswordHash(Secret<String>);

impl PartialEq for MemberPasswordHash {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl MemberPasswordHash {
    /// Accepts a stored PHC string, rejecting anything argon2 cannot read.
    pub fn parse(stored: Secret<String>) -> Result<Self> {
        PasswordHash::new(stored.expose_secret())
            .wrap_err("Failed to parse password hash")?;
        Ok(Self(stored))
    }

    #[tracing::instrument(name = "Computing password hash", skip_all)]
    pub async fn from_password(password: &Password) -> Result<Self> {
        let plain = password.as_ref().to_owned();

        let phc = in_blocking_span(move || {
            let salt = SaltString::generate(&mut rand::thread_rng());
            let phc = hasher()?
                .hash_password(plain.expose_secret().as_bytes(), &salt)?
                .to_string();
            Ok(Secret::new(phc))
        })
        .await?;

        Ok(Self(phc))
    }

    /// Ok when `candidate` hashes to this value.
    #[tracing::instrument(name = "Verify password hash", skip_all)]
    pub async fn verify(&self, candidate: &Secret<String>) -> Result<()> {
        let stored = self.0.clone();
        let candidate = candidate.clone();

        in_blocking_span(move || {
            let stored = PasswordHash::new(stored.expose_secret())?;
            Argon2::default()
                .verify_password(candidate.expose_secret().as_bytes(), &stored)
                .wrap_err("failed to verify password hash")
        })
        .await
    }
}

impl AsRef<Secret<String>> for MemberPasswordHash {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

fn hasher() -> Result<Argon2<'static>> {
    let params = Params::new(MEMORY_COST_KIB, ITERATIONS, PARALLELISM, None)?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashing is CPU bound; runs `work` off the async workers inside the
/// caller's span.
async fn in_blocking_span<T, F>(work: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    let span = tracing::Span::current();
    tokio::task::spawn_blocking(move || span.in_scope(work)).await?
}
