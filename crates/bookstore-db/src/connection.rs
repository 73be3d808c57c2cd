//! DuckDB connection wrapper.
//!
//! [`DbHandle`] owns a DuckDB [`Connection`] and provides helpers for
//! opening the catalog database and transacting against it.

use crate::error::{DbError, DbResult};
use duckdb::Connection;
use std::path::Path;

/// Wrapper around a DuckDB connection to the catalog database.
///
/// Single-threaded — migrations run sequentially to completion, so no
/// `Mutex` is needed.
pub struct DbHandle {
    conn: Connection,
}

impl DbHandle {
    /// Open (or create) the database file at `path`.
    pub fn open(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        log::debug!("Opened database at {}", path.display());
        Ok(Self { conn })
    }

    /// Create an in-memory database.
    ///
    /// Useful for unit tests that don't need persistence.
    pub fn open_in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Open from a path string (handles the `:memory:` special case).
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::open_in_memory()
        } else {
            Self::open(Path::new(path))
        }
    }

    /// Borrow the underlying DuckDB connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Execute `body` within a `BEGIN` / `COMMIT` transaction, rolling
    /// back on error.
    ///
    /// Generic over the caller's error type so that library crates can
    /// run their own fallible logic inside the transaction without
    /// translating errors at the boundary.
    pub fn transaction<T, E, F>(&self, body: F) -> Result<T, E>
    where
        E: From<DbError>,
        F: FnOnce(&Connection) -> Result<T, E>,
    {
        self.conn
            .execute_batch("BEGIN TRANSACTION")
            .map_err(|e| DbError::TransactionError(format!("BEGIN failed: {e}")))?;

        let result = body(&self.conn);

        match &result {
            Ok(_) => {
                if let Err(commit_err) = self.conn.execute_batch("COMMIT") {
                    let _ = self.conn.execute_batch("ROLLBACK");
                    return Err(
                        DbError::TransactionError(format!("COMMIT failed: {commit_err}")).into(),
                    );
                }
            }
            Err(_) => {
                let _ = self.conn.execute_batch("ROLLBACK");
            }
        }
        result
    }
}

#[cfg(test)]
#[path = "connection_test.rs"]
mod tests;
