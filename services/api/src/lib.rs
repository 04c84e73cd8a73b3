//! Printloom API service
//!
//! E-commerce backend for an AI-print shop: user registration and login,
//! a product catalog, and a mock design-generation endpoint. The auth
//! core (credential store, password hasher, token issuer) lives here and
//! is reused by the operational tooling.

pub mod auth;
pub mod error;
pub mod jwt;
pub mod models;
pub mod password;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;

pub use state::AppState;

/// Embedded migrations for the backing store; applied at startup.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
