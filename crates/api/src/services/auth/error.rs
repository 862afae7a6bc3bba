//! Authentication error types.

use thiserror::Error;

use warung_core::ValidationError;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed or missing input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Token could not be issued or checked.
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

/// Why a bearer token was not accepted.
///
/// The variants stay distinct for logging; every one of them reaches the
/// client as the same 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// No `Authorization: Bearer` header.
    #[error("missing token")]
    Missing,

    /// Bad signature or malformed structure.
    #[error("invalid token")]
    Invalid,

    /// Signature is fine but the token is past its expiry.
    #[error("token expired")]
    Expired,

    /// Signing failed.
    #[error("token could not be encoded")]
    Encode,
}
