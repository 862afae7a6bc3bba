//! Business logic services.
//!
//! - `auth` - Password hashing, bearer tokens, registration and login

pub mod auth;
