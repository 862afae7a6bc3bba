//! Salted Argon2id password digests.
//!
//! Digests are PHC strings (`$argon2id$v=19$m=...,t=...,p=1$salt$hash`), so
//! the salt and cost travel with the digest and verification needs nothing
//! else. Hashing is CPU-bound; the `async` wrappers move it onto tokio's
//! blocking pool.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use tokio::task::JoinError;

use super::AuthError;
use crate::config::PasswordHashConfig;

/// Hashes and verifies passwords with a fixed work factor.
#[derive(Clone)]
pub struct CredentialManager {
    params: Params,
}

impl CredentialManager {
    /// Create a manager with the given work factor.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHash` if the parameters are out of range
    /// for Argon2.
    pub fn new(config: PasswordHashConfig) -> Result<Self, AuthError> {
        let params = Params::new(config.memory_kib, config.iterations, 1, None)
            .map_err(|_| AuthError::PasswordHash)?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a password with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHash` if hashing fails.
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| AuthError::PasswordHash)
    }

    /// Check a password against a stored digest.
    ///
    /// The digest's own parameters are used, so a work-factor change does
    /// not invalidate existing accounts. A malformed digest never matches.
    #[must_use]
    pub fn verify(&self, password: &str, digest: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(digest) else {
            return false;
        };
        self.argon2()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// [`Self::hash`] on the blocking thread pool.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHash` if hashing fails or the task panics.
    pub async fn hash_async(&self, password: String) -> Result<String, AuthError> {
        let manager = self.clone();
        tokio::task::spawn_blocking(move || manager.hash(&password))
            .await
            .map_err(|_| AuthError::PasswordHash)?
    }

    /// [`Self::verify`] on the blocking thread pool.
    pub async fn verify_async(&self, password: String, digest: String) -> bool {
        let manager = self.clone();
        verified_or_reject(
            tokio::task::spawn_blocking(move || manager.verify(&password, &digest)).await,
        )
    }
}

/// A verification task that did not finish never counts as a match.
fn verified_or_reject(outcome: Result<bool, JoinError>) -> bool {
    match outcome {
        Ok(matches) => matches,
        Err(err) => {
            tracing::error!(error = %err, "password verification task failed");
            false
        }
    }
}
