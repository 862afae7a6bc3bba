//! Service metadata and health probes.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::state::AppState;

/// Service name reported by `/status`.
pub const SERVICE_NAME: &str = "api-warungklontong";

#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub ok: bool,
    pub service: &'static str,
}

/// `GET /`
pub async fn banner() -> &'static str {
    "API Warung Klontong"
}

/// `GET /status`
pub async fn status() -> Json<ServiceStatus> {
    Json(ServiceStatus {
        ok: true,
        service: SERVICE_NAME,
    })
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the product store is not reachable.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.products().ping().await {
        Ok(()) => StatusCode::OK,
        Err(err) => {
            tracing::warn!(error = %err, "readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
