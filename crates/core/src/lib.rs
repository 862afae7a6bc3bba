//! Warung Core - Shared domain types.
//!
//! This crate provides the validated domain types used by the Warung shop API:
//! accounts, roles, and product inventory records.
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP. Every type enforces its invariants at construction, so a value that
//! exists is a value that is valid.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, usernames, product codes, prices,
//!   and the closed role / stock status enumerations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
