//! Common library for the Printloom backend
//!
//! This crate provides shared infrastructure used by the API service and
//! the operational tooling: database configuration, connection pooling,
//! health checks, and the database error taxonomy.

pub mod database;
pub mod error;
