//! Product domain types and request bodies.
//!
//! JSON field names follow the `produk` table columns: `kd_produk`, `nm_brg`,
//! `hrg`, and `ket_stok`.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use warung_core::{Price, ProductCode, ProductName, StockStatus, ValidationError};

/// A product inventory record (domain type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Upper-cased primary key.
    #[serde(rename = "kd_produk")]
    pub code: ProductCode,
    #[serde(rename = "nm_brg")]
    pub name: ProductName,
    #[serde(rename = "hrg")]
    pub price: Price,
    #[serde(rename = "ket_stok")]
    pub stock_status: StockStatus,
}

/// Body of `POST /produk`.
///
/// Every field is required; they are optional here only so a missing field
/// is reported as a validation error naming it.
#[derive(Debug, Default, Deserialize)]
pub struct CreateProductRequest {
    pub kd_produk: Option<String>,
    pub nm_brg: Option<String>,
    pub hrg: Option<Decimal>,
    pub ket_stok: Option<String>,
}

impl TryFrom<CreateProductRequest> for Product {
    type Error = ValidationError;

    fn try_from(req: CreateProductRequest) -> Result<Self, Self::Error> {
        let code = req.kd_produk.ok_or_else(|| ValidationError::required("kd_produk"))?;
        let name = req.nm_brg.ok_or_else(|| ValidationError::required("nm_brg"))?;
        let price = req.hrg.ok_or_else(|| ValidationError::required("hrg"))?;
        let stock = req.ket_stok.ok_or_else(|| ValidationError::required("ket_stok"))?;

        Ok(Self {
            code: ProductCode::parse(&code)?,
            name: ProductName::parse(&name)?,
            price: Price::new(price)?,
            stock_status: stock.parse()?,
        })
    }
}

/// Body of `PUT /produk/{kd_produk}`.
///
/// The outer `Option` records whether the client sent the field at all; the
/// inner one whether it sent `null`. An absent field is left untouched, an
/// explicit `null` is rejected.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(default, deserialize_with = "present")]
    pub nm_brg: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub hrg: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "present")]
    pub ket_stok: Option<Option<String>>,
}

/// Marks a field as present whenever its key appears, even with a `null` value.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A sparse set of validated product field updates.
///
/// Holds only the fields the client supplied, and always at least one.
/// Fields are kept in the declaration order of the product's mutable
/// columns, which is also the order they are written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductPatch {
    pub name: Option<ProductName>,
    pub price: Option<Price>,
    pub stock_status: Option<StockStatus>,
}

impl ProductPatch {
    /// Validate a raw update request.
    ///
    /// Constrained-domain fields are checked first, then the patch must be
    /// non-empty.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` naming the offending field for an
    /// out-of-enum stock status, a `null`, a blank name or a non-positive
    /// price; or `"no fields to update"` when nothing was supplied.
    pub fn from_request(req: UpdateProductRequest) -> Result<Self, ValidationError> {
        let stock_status = match req.ket_stok {
            None => None,
            Some(None) => return Err(non_null("ket_stok")),
            Some(Some(s)) => Some(s.parse::<StockStatus>()?),
        };
        let name = match req.nm_brg {
            None => None,
            Some(None) => return Err(non_null("nm_brg")),
            Some(Some(s)) => Some(ProductName::parse(&s)?),
        };
        let price = match req.hrg {
            None => None,
            Some(None) => return Err(non_null("hrg")),
            Some(Some(d)) => Some(Price::new(d)?),
        };

        let patch = Self {
            name,
            price,
            stock_status,
        };
        if patch.is_empty() {
            return Err(ValidationError::general("no fields to update"));
        }
        Ok(patch)
    }

    /// Whether no field is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.stock_status.is_none()
    }

    /// Apply the present fields to `product`, leaving the rest unchanged.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(stock_status) = self.stock_status {
            product.stock_status = stock_status;
        }
    }
}

fn non_null(field: &'static str) -> ValidationError {
    ValidationError::field(field, "must not be null")
}
