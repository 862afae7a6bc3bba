//! Account repository.
//!
//! Usernames arrive already lower-cased (see [`Username`]); the unique index
//! on `users.username` therefore rejects case variants of an existing name.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use warung_core::{AccountId, Role, Username};

use super::{RepositoryError, UniqueField, translate};
use crate::models::{Account, AccountCredentials};

/// Storage contract for accounts.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a new account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict(UniqueField::Username)` if the
    /// username is taken, `RepositoryError::Database` for other failures.
    async fn create(
        &self,
        username: &Username,
        password_hash: &str,
        role: Role,
    ) -> Result<Account, RepositoryError>;

    /// Look up an account and its password digest by username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn find_credentials(
        &self,
        username: &Username,
    ) -> Result<Option<AccountCredentials>, RepositoryError>;
}

/// `PostgreSQL` account repository.
#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    /// Create a new account repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn create(
        &self,
        username: &Username,
        password_hash: &str,
        role: Role,
    ) -> Result<Account, RepositoryError> {
        let row = sqlx::query(
            r"
            INSERT INTO users (username, password, role)
            VALUES ($1, $2, $3)
            RETURNING id, username, role
            ",
        )
        .bind(username.as_str())
        .bind(password_hash)
        .bind(role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| translate(e, UniqueField::Username))?;

        account_from_row(&row)
    }

    async fn find_credentials(
        &self,
        username: &Username,
    ) -> Result<Option<AccountCredentials>, RepositoryError> {
        let row = sqlx::query(
            r"
            SELECT id, username, role, password
            FROM users
            WHERE username = $1
            ",
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let account = account_from_row(&row)?;
        let password_hash: String = row.try_get("password")?;

        Ok(Some(AccountCredentials {
            account,
            password_hash,
        }))
    }
}

fn account_from_row(row: &PgRow) -> Result<Account, RepositoryError> {
    let id: AccountId = row.try_get("id")?;
    let username: String = row.try_get("username")?;
    let role: String = row.try_get("role")?;

    let username = Username::parse(&username).map_err(|e| {
        RepositoryError::DataCorruption(format!("invalid username in database: {e}"))
    })?;
    let role = role
        .parse::<Role>()
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid role in database: {e}")))?;

    Ok(Account { id, username, role })
}
