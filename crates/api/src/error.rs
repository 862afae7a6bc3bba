//! Unified error handling with Sentry integration.
//!
//! Every handler returns `Result<T, AppError>`. Client-caused errors map to
//! 4xx with a short message; anything else is logged, captured to Sentry and
//! collapsed to a generic 500 body.
//!
//! | Variant | Status |
//! |---|---|
//! | `Validation`, `Database(Invalid)` | 400 |
//! | `Unauthenticated`, `Auth(InvalidCredentials)` | 401 |
//! | `Forbidden` | 403 |
//! | `NotFound`, `Database(NotFound)` | 404 |
//! | `Database(Conflict)` | 409 |
//! | everything else | 500 |

use axum::{
    Json,
    extract::{FromRequest, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use warung_core::ValidationError;

use crate::db::RepositoryError;
use crate::services::auth::{AuthError, TokenError};

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed, missing or out-of-range input.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// No usable bearer token.
    #[error("unauthenticated: {0}")]
    Unauthenticated(TokenError),

    /// Authenticated, but the role is not allowed.
    #[error("forbidden")]
    Forbidden,

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(ValidationError::general(format!(
            "invalid request body: {}",
            rejection.body_text()
        )))
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(err) => repository_status(err),
            Self::Auth(err) => match err {
                AuthError::Validation(_) => StatusCode::BAD_REQUEST,
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::Repository(err) => repository_status(err),
                AuthError::Token(_) | AuthError::PasswordHash => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message sent to the client. Server errors never expose detail.
    fn public_message(&self) -> String {
        match self {
            Self::Validation(err) | Self::Auth(AuthError::Validation(err)) => err.to_string(),
            Self::Unauthenticated(_) => "unauthenticated".to_string(),
            Self::Forbidden => "forbidden".to_string(),
            Self::NotFound(_) => self.to_string(),
            Self::Database(err) | Self::Auth(AuthError::Repository(err)) => match err {
                RepositoryError::Invalid(_)
                | RepositoryError::Conflict(_)
                | RepositoryError::NotFound => err.to_string(),
                _ => "Internal server error".to_string(),
            },
            Self::Auth(AuthError::InvalidCredentials) => "invalid credentials".to_string(),
            Self::Auth(_) | Self::Internal(_) => "Internal server error".to_string(),
        }
    }
}

const fn repository_status(err: &RepositoryError) -> StatusCode {
    match err {
        RepositoryError::Invalid(_) => StatusCode::BAD_REQUEST,
        RepositoryError::Conflict(_) => StatusCode::CONFLICT,
        RepositoryError::NotFound => StatusCode::NOT_FOUND,
        RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// JSON body extractor whose rejections are `AppError::Validation`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
