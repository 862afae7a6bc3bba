//! HTTP middleware and extractors.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added in `main`)
//! 2. `TraceLayer` (request span with an empty `request_id` field)
//! 3. Request ID (fills the span field, tags Sentry, echoes the header)
//! 4. CORS (all origins)
//!
//! Authentication is not a layer: protected handlers take a
//! [`RequireAuth`] or [`RequireAdmin`] extractor.

pub mod auth;
pub mod request_id;

pub use auth::{
    AdminOnly, RequireAdmin, RequireAuth, RequireRole, RolePolicy, authenticate, authorize,
    bearer_token,
};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
