//! Bearer-token authentication and role authorization extractors.
//!
//! Authentication always runs before authorization, so a request with no
//! usable token gets a 401 even on a route its role could never reach.
//!
//! # Example
//!
//! ```rust,ignore
//! async fn create(RequireAuth(claims): RequireAuth) -> impl IntoResponse { ... }
//! async fn delete(RequireRole(claims, _): RequireAdmin) -> impl IntoResponse { ... }
//! ```

use std::marker::PhantomData;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};

use warung_core::Role;

use crate::error::AppError;
use crate::services::auth::{IdentityClaims, TokenError, TokenService};
use crate::state::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Pull the token out of `Authorization: Bearer <token>`.
///
/// # Errors
///
/// Returns `TokenError::Missing` if the header is absent, not valid text,
/// uses another scheme, or carries an empty token.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, TokenError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(TokenError::Missing)
}

/// Verify the request's bearer token.
///
/// # Errors
///
/// Returns the `TokenError` describing why the token was not accepted.
pub fn authenticate(headers: &HeaderMap, tokens: &TokenService) -> Result<IdentityClaims, TokenError> {
    let token = bearer_token(headers)?;
    tokens.verify(token)
}

/// Require that already-authenticated claims carry one of `allowed`.
///
/// # Errors
///
/// Returns `AppError::Forbidden` if the role is not allowed.
pub fn authorize(claims: &IdentityClaims, allowed: &[Role]) -> Result<(), AppError> {
    if allowed.contains(&claims.role()) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

fn authenticate_parts(parts: &Parts, state: &AppState) -> Result<IdentityClaims, AppError> {
    authenticate(&parts.headers, state.tokens()).map_err(|reason| {
        tracing::debug!(%reason, path = %parts.uri.path(), "authentication failed");
        AppError::Unauthenticated(reason)
    })
}

/// Extractor that requires a valid bearer token of any role.
pub struct RequireAuth(pub IdentityClaims);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate_parts(parts, state).map(Self)
    }
}

/// The set of roles a [`RequireRole`] route admits.
pub trait RolePolicy {
    const ALLOWED: &'static [Role];
}

/// Admits only [`Role::Admin`].
pub struct AdminOnly;

impl RolePolicy for AdminOnly {
    const ALLOWED: &'static [Role] = &[Role::Admin];
}

/// Extractor that requires a valid bearer token whose role is admitted by `P`.
pub struct RequireRole<P>(pub IdentityClaims, pub PhantomData<P>);

/// Admin-only routes.
pub type RequireAdmin = RequireRole<AdminOnly>;

impl<P> FromRequestParts<AppState> for RequireRole<P>
where
    P: RolePolicy + Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = authenticate_parts(parts, state)?;
        if let Err(err) = authorize(&claims, P::ALLOWED) {
            tracing::debug!(
                account_id = %claims.user.id,
                role = %claims.role(),
                path = %parts.uri.path(),
                "role not permitted"
            );
            return Err(err);
        }
        Ok(Self(claims, PhantomData))
    }
}
