//! Registration and login handlers.
//!
//! Both registration routes share one handler body; only the granted role
//! differs. `/auth/register-admin` is open, as the shop has always run it.

use axum::{extract::State, http::StatusCode, response::IntoResponse};

use warung_core::Role;

use crate::error::{ApiJson, Result};
use crate::models::{LoginRequest, LoginResponse, RegisterRequest, RegisteredAccount};
use crate::state::AppState;

/// `POST /auth/register`
pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse> {
    register_as(&state, body, Role::User).await
}

/// `POST /auth/register-admin`
pub async fn register_admin(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse> {
    register_as(&state, body, Role::Admin).await
}

async fn register_as(
    state: &AppState,
    body: RegisterRequest,
    role: Role,
) -> Result<(StatusCode, axum::Json<RegisteredAccount>)> {
    let account = state
        .auth()
        .register(body.username.as_deref(), body.password.as_deref(), role)
        .await?;

    Ok((StatusCode::CREATED, axum::Json(account.into())))
}

/// `POST /auth/login`
pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<axum::Json<LoginResponse>> {
    let (account, token) = state
        .auth()
        .login(body.username.as_deref(), body.password.as_deref())
        .await?;

    tracing::info!(account_id = %account.id, "login succeeded");

    Ok(axum::Json(LoginResponse {
        message: "login berhasil".to_string(),
        token,
    }))
}
