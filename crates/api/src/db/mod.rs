//! Database operations for the shop `PostgreSQL` store.
//!
//! # Tables
//!
//! - `users` - Accounts (`id`, unique `username`, `password` digest, `role`)
//! - `produk` - Product inventory (`kd_produk` primary key, `nm_brg`, `hrg`, `ket_stok`)
//!
//! The schema lives in `crates/api/sql/schema.sql`.
//!
//! # Storage seam
//!
//! Handlers talk to [`AccountStore`] and [`ProductStore`]. The Postgres
//! implementations run parameterized statements over a pooled connection that
//! is checked out per call and returned when the call finishes, whether it
//! succeeded or failed. [`MemoryStore`] implements the same contracts,
//! uniqueness constraints included, without a database.

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use warung_core::ValidationError;

pub mod accounts;
pub mod conflict;
pub mod memory;
pub mod products;
pub mod update;

pub use accounts::{AccountStore, PgAccountStore};
pub use conflict::{StorageErrorKind, UniqueField, translate};
pub use memory::MemoryStore;
pub use products::{PgProductStore, ProductStore};
pub use update::{SqlParam, UpdateStatement, build_product_update};

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx that is not a recognised constraint violation.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Uniqueness violation on the named field.
    #[error("conflict on {0}")]
    Conflict(UniqueField),

    /// The requested write is not expressible (e.g. an empty patch).
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
