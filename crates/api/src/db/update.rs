//! Parameterized partial-update statements.
//!
//! [`build_update`] is a pure function from a key and a sparse list of column
//! assignments to a statement template plus its ordered parameters. Column
//! and table names are compile-time identifiers; every caller-supplied value
//! travels as a bound parameter and never appears in the statement text.

use rust_decimal::Decimal;

use warung_core::{ProductCode, ValidationError};

use crate::models::ProductPatch;

/// Columns returned by every product statement.
pub const PRODUCT_COLUMNS: &str = "kd_produk, nm_brg, hrg, ket_stok";

/// A value bound to a positional parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    Text(String),
    Numeric(Decimal),
}

/// A ready-to-execute statement with its parameters in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStatement {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

/// Build `UPDATE <table> SET a = $1, b = $2 WHERE <key_column> = $3 RETURNING <returning>`.
///
/// Assignments are emitted in the order given; the key is always the last
/// parameter.
///
/// # Errors
///
/// Returns `"no fields to update"` if `assignments` is empty.
pub fn build_update(
    table: &'static str,
    key_column: &'static str,
    key: SqlParam,
    assignments: Vec<(&'static str, SqlParam)>,
    returning: &'static str,
) -> Result<UpdateStatement, ValidationError> {
    if assignments.is_empty() {
        return Err(ValidationError::general("no fields to update"));
    }

    let mut clauses = Vec::with_capacity(assignments.len());
    let mut params = Vec::with_capacity(assignments.len() + 1);
    for (column, value) in assignments {
        params.push(value);
        clauses.push(format!("{column} = ${}", params.len()));
    }
    params.push(key);

    let sql = format!(
        "UPDATE {table} SET {} WHERE {key_column} = ${} RETURNING {returning}",
        clauses.join(", "),
        params.len()
    );

    Ok(UpdateStatement { sql, params })
}

/// Build the update statement for a product patch.
///
/// Fields are written in the declaration order of the product's mutable
/// columns: `nm_brg`, `hrg`, `ket_stok`.
///
/// # Errors
///
/// Returns `"no fields to update"` if the patch is empty.
pub fn build_product_update(
    code: &ProductCode,
    patch: &ProductPatch,
) -> Result<UpdateStatement, ValidationError> {
    let mut assignments = Vec::with_capacity(3);
    if let Some(name) = &patch.name {
        assignments.push(("nm_brg", SqlParam::Text(name.as_str().to_owned())));
    }
    if let Some(price) = patch.price {
        assignments.push(("hrg", SqlParam::Numeric(price.amount())));
    }
    if let Some(stock_status) = patch.stock_status {
        assignments.push(("ket_stok", SqlParam::Text(stock_status.as_str().to_owned())));
    }

    build_update(
        "produk",
        "kd_produk",
        SqlParam::Text(code.as_str().to_owned()),
        assignments,
        PRODUCT_COLUMNS,
    )
}
