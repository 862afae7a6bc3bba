//! Account username type.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// A case-normalized account username.
///
/// Usernames are lower-cased on construction so that `"Alice"` and `"alice"`
/// name the same account both at registration and at login.
///
/// ## Examples
///
/// ```
/// use warung_core::Username;
///
/// let name = Username::parse("Alice").unwrap();
/// assert_eq!(name.as_str(), "alice");
///
/// assert!(Username::parse("").is_err());
/// assert!(Username::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Parse and normalize a username.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` on `username` if the input is blank.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if s.trim().is_empty() {
            return Err(ValidationError::required("username"));
        }
        Ok(Self(s.to_lowercase()))
    }

    /// Returns the normalized username.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Username {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
