//! Product inventory types.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// A case-normalized product code (the product's primary key).
///
/// Codes are upper-cased on construction so `"ab1"` and `"AB1"` address the
/// same product in every operation.
///
/// ```
/// use warung_core::ProductCode;
///
/// assert_eq!(ProductCode::parse("ab1").unwrap().as_str(), "AB1");
/// assert!(ProductCode::parse("").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct ProductCode(String);

impl ProductCode {
    /// Parse and normalize a product code.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` on `kd_produk` if the input is blank.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if s.trim().is_empty() {
            return Err(ValidationError::required("kd_produk"));
        }
        Ok(Self(s.to_uppercase()))
    }

    /// Returns the normalized code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ProductCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ProductCode> for String {
    fn from(value: ProductCode) -> Self {
        value.0
    }
}

/// A non-empty product display name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct ProductName(String);

impl ProductName {
    /// Parse a product name.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` on `nm_brg` if the input is blank.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if s.trim().is_empty() {
            return Err(ValidationError::required("nm_brg"));
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ProductName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ProductName> for String {
    fn from(value: ProductName) -> Self {
        value.0
    }
}

/// Stock availability of a product.
///
/// Stored and serialized as `ada` / `habis`. The English spellings
/// `available` / `out_of_stock` are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockStatus {
    /// In stock.
    #[serde(rename = "ada", alias = "available")]
    Available,
    /// Sold out.
    #[serde(rename = "habis", alias = "out_of_stock")]
    OutOfStock,
}

impl StockStatus {
    /// Stored values, in declaration order.
    pub const STORED_VALUES: [&'static str; 2] = ["ada", "habis"];

    /// Stored / serialized form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "ada",
            Self::OutOfStock => "habis",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StockStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ada" | "available" => Ok(Self::Available),
            "habis" | "out_of_stock" => Ok(Self::OutOfStock),
            _ => Err(ValidationError::not_one_of("ket_stok", &Self::STORED_VALUES)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_code_uppercased() {
        assert_eq!(ProductCode::parse("ab1").unwrap().as_str(), "AB1");
        assert_eq!(
            ProductCode::parse("ab1").unwrap(),
            ProductCode::parse("AB1").unwrap()
        );
    }

    #[test]
    fn test_long_code_accepted() {
        let code = ProductCode::parse(&"a".repeat(200)).unwrap();
        assert_eq!(code.as_str(), "A".repeat(200));
    }

    #[test]
    fn test_code_blank_rejected() {
        let err = ProductCode::parse("  ").unwrap_err();
        assert_eq!(err.field_name(), Some("kd_produk"));
    }

    #[test]
    fn test_name_blank_rejected() {
        assert!(ProductName::parse("").is_err());
        assert_eq!(ProductName::parse("Beras 5kg").unwrap().as_str(), "Beras 5kg");
    }

    #[test]
    fn test_stock_status_parse() {
        assert_eq!("ada".parse::<StockStatus>().unwrap(), StockStatus::Available);
        assert_eq!("habis".parse::<StockStatus>().unwrap(), StockStatus::OutOfStock);
        assert_eq!(
            "out_of_stock".parse::<StockStatus>().unwrap(),
            StockStatus::OutOfStock
        );
    }

    #[test]
    fn test_stock_status_rejects_unknown() {
        let err = "maybe".parse::<StockStatus>().unwrap_err();
        assert_eq!(err.field_name(), Some("ket_stok"));
        assert_eq!(err.to_string(), "ket_stok must be one of: ada, habis");
    }

    #[test]
    fn test_stock_status_serializes_stored_value() {
        assert_eq!(
            serde_json::to_string(&StockStatus::OutOfStock).unwrap(),
            "\"habis\""
        );
        let parsed: StockStatus = serde_json::from_str("\"available\"").unwrap();
        assert_eq!(parsed, StockStatus::Available);
    }
}
