//! Product repository.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use warung_core::{Price, ProductCode, ProductName, StockStatus, ValidationError};

use super::update::PRODUCT_COLUMNS;
use super::{RepositoryError, SqlParam, UniqueField, build_product_update, translate};
use crate::models::{Product, ProductPatch};

/// Storage contract for products.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products ordered by code.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn list(&self) -> Result<Vec<Product>, RepositoryError>;

    /// A single product by code.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn get(&self, code: &ProductCode) -> Result<Option<Product>, RepositoryError>;

    /// Insert a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict(UniqueField::ProductCode)` if the
    /// code already exists.
    async fn create(&self, product: &Product) -> Result<Product, RepositoryError>;

    /// Apply a patch to an existing product.
    ///
    /// Returns `None` when no product has `code`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    async fn update(
        &self,
        code: &ProductCode,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, RepositoryError>;

    /// Delete a product.
    ///
    /// Returns `true` if a product was deleted, `false` if none matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    async fn delete(&self, code: &ProductCode) -> Result<bool, RepositoryError>;

    /// Check that the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the store cannot be reached.
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

/// `PostgreSQL` product repository.
#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM produk ORDER BY kd_produk ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(product_from_row).collect()
    }

    async fn get(&self, code: &ProductCode) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM produk WHERE kd_produk = $1"
        ))
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(product_from_row).transpose()
    }

    async fn create(&self, product: &Product) -> Result<Product, RepositoryError> {
        let row = sqlx::query(&format!(
            "INSERT INTO produk (kd_produk, nm_brg, hrg, ket_stok) VALUES ($1, $2, $3, $4) RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(product.code.as_str())
        .bind(product.name.as_str())
        .bind(product.price.amount())
        .bind(product.stock_status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| translate(e, UniqueField::ProductCode))?;

        product_from_row(&row)
    }

    async fn update(
        &self,
        code: &ProductCode,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, RepositoryError> {
        let stmt = build_product_update(code, patch)?;

        let mut query = sqlx::query(&stmt.sql);
        for param in stmt.params {
            query = match param {
                SqlParam::Text(text) => query.bind(text),
                SqlParam::Numeric(amount) => query.bind(amount),
            };
        }

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| translate(e, UniqueField::ProductCode))?;

        row.as_ref().map(product_from_row).transpose()
    }

    async fn delete(&self, code: &ProductCode) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM produk WHERE kd_produk = $1")
            .bind(code.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}

fn product_from_row(row: &PgRow) -> Result<Product, RepositoryError> {
    let code: String = row.try_get("kd_produk")?;
    let name: String = row.try_get("nm_brg")?;
    let price: Decimal = row.try_get("hrg")?;
    let stock_status: String = row.try_get("ket_stok")?;

    let corrupt =
        |e: ValidationError| RepositoryError::DataCorruption(format!("invalid product row: {e}"));

    Ok(Product {
        code: ProductCode::parse(&code).map_err(corrupt)?,
        name: ProductName::parse(&name).map_err(corrupt)?,
        price: Price::new(price).map_err(corrupt)?,
        stock_status: stock_status.parse::<StockStatus>().map_err(corrupt)?,
    })
}
