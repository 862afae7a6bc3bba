//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                     - Banner
//! GET    /status               - Service status
//! GET    /health               - Liveness
//! GET    /health/ready         - Readiness (store reachable)
//!
//! # Auth
//! POST   /auth/register        - Register a user account
//! POST   /auth/register-admin  - Register an admin account
//! POST   /auth/login           - Exchange credentials for a bearer token
//!
//! # Products
//! GET    /produk               - List products
//! GET    /produk/{kd_produk}   - Product detail
//! POST   /produk               - Create product (any role)
//! PUT    /produk/{kd_produk}   - Partial update (admin)
//! DELETE /produk/{kd_produk}   - Delete product (admin)
//! ```

pub mod auth;
pub mod products;
pub mod status;

use axum::{
    Router,
    http::Request,
    middleware::from_fn,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::AppError;
use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/register-admin", post(auth::register_admin))
        .route("/login", post(auth::login))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route(
            "/{kd_produk}",
            get(products::show)
                .put(products::update)
                .delete(products::delete),
        )
}

/// Create all routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(status::banner))
        .route("/status", get(status::status))
        .route("/health", get(status::health))
        .route("/health/ready", get(status::readiness))
        .nest("/auth", auth_routes())
        .nest("/produk", product_routes())
        .fallback(fallback)
}

/// The full application with tracing, request ids and CORS.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(CorsLayer::permissive())
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}

async fn fallback() -> AppError {
    AppError::NotFound("route".to_string())
}
