//! Core types for Warung.
//!
//! This module provides type-safe wrappers for the shop's domain concepts.

pub mod id;
pub mod price;
pub mod product;
pub mod role;
pub mod username;
pub mod validation;

pub use id::*;
pub use price::Price;
pub use product::{ProductCode, ProductName, StockStatus};
pub use role::Role;
pub use username::Username;
pub use validation::ValidationError;
