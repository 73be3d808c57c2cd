//! Schema migration runner for the bookstore catalog database.
//!
//! Discovers ordered `.sql` files from a migrations directory, tracks
//! applied versions in a `schema_migrations` ledger table, and applies
//! each pending migration inside its own transaction so a version is
//! either fully applied-and-recorded or entirely absent.
//!
//! Entry point is [`Runner`], constructed from a [`bookstore_db::DbHandle`]
//! and a migrations directory:
//!
//! ```ignore
//! let db = DbHandle::new("catalog.duckdb")?;
//! let runner = Runner::new(&db, Path::new("migrations"));
//! let applied = runner.migrate()?;
//! ```

pub mod error;
pub mod executor;
pub mod files;
pub mod ledger;
pub mod runner;
pub mod validate;

pub use error::{MigrateError, MigrateResult};
pub use files::MigrationFile;
pub use ledger::LedgerEntry;
pub use runner::Runner;
