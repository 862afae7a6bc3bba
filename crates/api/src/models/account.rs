//! Account domain types.

use serde::{Deserialize, Serialize};

use warung_core::{AccountId, Role, Username};

/// A shop account (domain type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Storage-assigned account ID.
    pub id: AccountId,
    /// Lower-cased, unique username.
    pub username: Username,
    /// Permission tier.
    pub role: Role,
}

/// An account together with its stored password digest.
///
/// Only produced for login; never serialized.
#[derive(Debug, Clone)]
pub struct AccountCredentials {
    pub account: Account,
    pub password_hash: String,
}

/// Body of `POST /auth/register` and `POST /auth/register-admin`.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Response for a successful registration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisteredAccount {
    pub id: AccountId,
    pub username: Username,
}

impl From<Account> for RegisteredAccount {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
        }
    }
}

/// Response for a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}
