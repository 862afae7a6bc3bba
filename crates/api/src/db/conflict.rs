//! Translation of storage uniqueness violations into domain conflicts.
//!
//! Storage errors are classified exactly once, here. Callers above the
//! repository layer only ever see [`RepositoryError::Conflict`] carrying a
//! logical field name; they never inspect engine-specific error codes.

use core::fmt;

use super::RepositoryError;

/// Logical name of a uniqueness-constrained field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniqueField {
    /// `users.username`
    Username,
    /// `produk.kd_produk`
    ProductCode,
}

impl UniqueField {
    /// Name reported to clients.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::ProductCode => "code",
        }
    }
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Engine-neutral classification of a storage failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorKind {
    /// Insert or update would duplicate a value in a unique column.
    UniqueViolation,
    /// Anything else.
    Other,
}

impl StorageErrorKind {
    /// Classify a sqlx error.
    #[must_use]
    pub fn of(err: &sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => Self::UniqueViolation,
            _ => Self::Other,
        }
    }
}

/// Translate a failed write against a uniqueness-constrained table.
///
/// A uniqueness violation becomes [`RepositoryError::Conflict`] on `field`;
/// every other error passes through unmodified.
#[must_use]
pub fn translate(err: sqlx::Error, field: UniqueField) -> RepositoryError {
    match StorageErrorKind::of(&err) {
        StorageErrorKind::UniqueViolation => {
            tracing::debug!(field = %field, error = %err, "uniqueness violation");
            RepositoryError::Conflict(field)
        }
        StorageErrorKind::Other => RepositoryError::Database(err),
    }
}
