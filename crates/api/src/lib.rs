//! Warung Klontong shop API library.
//!
//! Accounts with bearer-token authentication and a role-gated product
//! inventory, exposed as an axum [`Router`](axum::Router) via
//! [`routes::app`] so it can be driven in tests without a socket.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
