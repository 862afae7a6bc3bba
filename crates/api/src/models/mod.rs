//! Domain models and request/response shapes for the API.
//!
//! Domain types here are built from already-validated `warung_core` values.
//! Request types mirror the JSON bodies clients send and carry only raw,
//! unvalidated input until converted.

pub mod account;
pub mod product;

pub use account::{
    Account, AccountCredentials, LoginRequest, LoginResponse, RegisterRequest, RegisteredAccount,
};
pub use product::{CreateProductRequest, Product, ProductPatch, UpdateProductRequest};
