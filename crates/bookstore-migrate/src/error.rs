//! Error types for bookstore-migrate

use bookstore_db::DbError;
use thiserror::Error;

/// Migration subsystem errors.
///
/// A missing migrations directory and a not-yet-created ledger table
/// are deliberately NOT errors; both are valid bootstrap states.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// Migrations directory exists but cannot be read (M001).
    #[error("[M001] Cannot read migrations directory {path}: {message}")]
    Discovery { path: String, message: String },

    /// A migration file is empty (M002). Fatal; no migrations run.
    #[error("[M002] Migration file is empty: {path}")]
    EmptyFile { path: String },

    /// SQL failure while applying one migration, or failure to insert
    /// its ledger row (M003). The file's transaction is rolled back.
    #[error("[M003] Migration '{version}' failed: {message}")]
    Execution { version: String, message: String },

    /// The ledger table itself cannot be created or queried (M004).
    #[error("[M004] Migration ledger error: {0}")]
    Persistence(String),

    /// Rollback requested but no applied entries exist (M005).
    #[error("[M005] Nothing to roll back")]
    NothingToRollBack,
}

/// Result type alias for MigrateError
pub type MigrateResult<T> = Result<T, MigrateError>;

impl From<DbError> for MigrateError {
    fn from(err: DbError) -> Self {
        MigrateError::Persistence(err.to_string())
    }
}
