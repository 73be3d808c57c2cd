//! Core library for the bookstore migration tool.
//!
//! Holds the project configuration (`bookstore.yml`) and the shared
//! error types. Everything database-shaped lives in `bookstore-db`;
//! the migration logic itself lives in `bookstore-migrate`.

pub mod config;
pub mod error;

pub use config::{Config, DatabaseConfig};
pub use error::{CoreError, CoreResult};
