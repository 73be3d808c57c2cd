//! bookstore-db - Database connection layer for the bookstore migration tool
//!
//! Provides [`DbHandle`], an explicitly constructed DuckDB connection
//! wrapper that is passed down to callers instead of living in a
//! process-wide singleton. One handle per process is the intended
//! resource policy; the handle itself stays single-threaded.

pub mod connection;
pub mod error;

pub use connection::DbHandle;
pub use error::{DbError, DbResult};
