//! Account roles.

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Coarse permission tier of an account.
///
/// Closed enumeration: anything other than `user` or `admin` is rejected,
/// never coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular shop account. May create products.
    User,
    /// Shop administrator. May also update and delete products.
    Admin,
}

impl Role {
    /// Stored / serialized form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(ValidationError::not_one_of("role", &["user", "admin"])),
        }
    }
}
