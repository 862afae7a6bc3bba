//! Validation error shared by every constrained domain type.

use core::fmt;

/// Input failed a domain constraint.
///
/// Carries the external name of the offending field (when there is one) so
/// callers can report exactly which input was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    field: Option<&'static str>,
    reason: String,
}

impl ValidationError {
    /// A constraint violation on a single named field.
    #[must_use]
    pub fn field(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field: Some(field),
            reason: reason.into(),
        }
    }

    /// A constraint violation on the request as a whole.
    #[must_use]
    pub fn general(reason: impl Into<String>) -> Self {
        Self {
            field: None,
            reason: reason.into(),
        }
    }

    /// A value outside a closed enumeration.
    #[must_use]
    pub fn not_one_of(field: &'static str, allowed: &[&str]) -> Self {
        Self::field(field, format!("must be one of: {}", allowed.join(", ")))
    }

    /// A required field that was absent or null.
    #[must_use]
    pub fn required(field: &'static str) -> Self {
        Self::field(field, "is required")
    }

    /// Name of the rejected field, if the error concerns one.
    #[must_use]
    pub const fn field_name(&self) -> Option<&'static str> {
        self.field
    }

    /// Human-readable reason.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field {
            Some(field) => write!(f, "{field} {}", self.reason),
            None => f.write_str(&self.reason),
        }
    }
}

impl std::error::Error for ValidationError {}
