//! Authentication service.
//!
//! Registration and password login over an [`AccountStore`], with digests
//! from [`CredentialManager`] and bearer tokens from [`TokenService`].

mod error;
mod password;
mod token;

pub use error::{AuthError, TokenError};
pub use password::CredentialManager;
pub use token::{IdentityClaims, TokenService, TokenUser};

use warung_core::{Role, Username, ValidationError};

use crate::db::AccountStore;
use crate::models::Account;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Authentication service.
///
/// Borrows the shared stores and keys for the duration of one request.
pub struct AuthService<'a> {
    accounts: &'a dyn AccountStore,
    credentials: &'a CredentialManager,
    tokens: &'a TokenService,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(
        accounts: &'a dyn AccountStore,
        credentials: &'a CredentialManager,
        tokens: &'a TokenService,
    ) -> Self {
        Self {
            accounts,
            credentials,
            tokens,
        }
    }

    /// Register a new account with the given role.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` if the username is blank or the
    /// password is too short.
    /// Returns `AuthError::Repository` wrapping `RepositoryError::Conflict`
    /// if the username is already taken.
    pub async fn register(
        &self,
        username: Option<&str>,
        password: Option<&str>,
        role: Role,
    ) -> Result<Account, AuthError> {
        let username = Username::parse(username.unwrap_or_default())?;
        let password = password.ok_or_else(|| ValidationError::required("password"))?;
        validate_password(password)?;

        let password_hash = self.credentials.hash_async(password.to_owned()).await?;
        let account = self
            .accounts
            .create(&username, &password_hash, role)
            .await?;

        tracing::info!(account_id = %account.id, role = %role, "account registered");
        Ok(account)
    }

    /// Login with username and password, returning the account and a token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` if either field is missing.
    /// Returns `AuthError::InvalidCredentials` if the username is unknown or
    /// the password is wrong.
    pub async fn login(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<(Account, String), AuthError> {
        let username = Username::parse(username.unwrap_or_default())?;
        let password = password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ValidationError::required("password"))?;

        let credentials = self
            .accounts
            .find_credentials(&username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let matches = self
            .credentials
            .verify_async(password.to_owned(), credentials.password_hash)
            .await;
        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(&credentials.account)?;
        Ok((credentials.account, token))
    }
}

/// Validate password requirements.
fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::field(
            "password",
            format!("must be at least {MIN_PASSWORD_LENGTH} characters"),
        ));
    }
    Ok(())
}
