//! Persistent ledger of applied migrations.
//!
//! One row per applied version in the `schema_migrations` table. Rows
//! are written inside the same transaction as the schema change they
//! record (see [`crate::executor`]) and removed only by rollback.

use crate::error::{MigrateError, MigrateResult};
use duckdb::Connection;
use serde::Serialize;
use std::collections::BTreeSet;

/// A fact: "migration `version` was applied at `applied_at`".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    /// Soft reference to a [`crate::MigrationFile`] version; unique in
    /// the ledger.
    pub version: String,
    /// RFC 3339 timestamp recorded at commit time.
    pub applied_at: String,
}

/// Idempotent DDL for the ledger table.
///
/// `version` carries a UNIQUE constraint: if two processes race to
/// apply the same file, the loser's ledger insert fails and its whole
/// transaction rolls back.
const ENSURE_LEDGER_SQL: &str = "\
CREATE SEQUENCE IF NOT EXISTS schema_migrations_id_seq;
CREATE TABLE IF NOT EXISTS schema_migrations (
    id         INTEGER PRIMARY KEY DEFAULT nextval('schema_migrations_id_seq'),
    version    VARCHAR NOT NULL UNIQUE,
    applied_at VARCHAR NOT NULL
);";

/// Create the ledger table if absent.
pub fn ensure_ledger_table(conn: &Connection) -> MigrateResult<()> {
    conn.execute_batch(ENSURE_LEDGER_SQL).map_err(|e| {
        MigrateError::Persistence(format!("failed to create schema_migrations table: {e}"))
    })?;
    Ok(())
}

/// All recorded versions.
///
/// Returns an empty set when the ledger table does not exist yet
/// (bootstrap case).
pub fn applied_versions(conn: &Connection) -> MigrateResult<BTreeSet<String>> {
    let mut stmt = match conn.prepare("SELECT version FROM schema_migrations") {
        Ok(stmt) => stmt,
        Err(e) if is_missing_ledger(&e) => return Ok(BTreeSet::new()),
        Err(e) => {
            return Err(MigrateError::Persistence(format!(
                "failed to read applied versions: {e}"
            )))
        }
    };
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(|e| MigrateError::Persistence(format!("failed to read applied versions: {e}")))?;
    rows.collect::<Result<BTreeSet<String>, _>>()
        .map_err(|e| MigrateError::Persistence(format!("failed to read applied versions: {e}")))
}

/// Insert one ledger row.
///
/// Must be called inside the same transaction as the corresponding
/// schema change; a failure here is an execution failure of that
/// migration, not a ledger bootstrap problem.
pub fn record_applied(conn: &Connection, version: &str, applied_at: &str) -> MigrateResult<()> {
    conn.execute(
        "INSERT INTO schema_migrations (version, applied_at) VALUES (?, ?)",
        duckdb::params![version, applied_at],
    )
    .map_err(|e| MigrateError::Execution {
        version: version.to_string(),
        message: format!("failed to record in ledger: {e}"),
    })?;
    Ok(())
}

/// All applied entries ordered by `applied_at` ascending (ties broken
/// by insert order). Empty when the ledger table does not exist yet.
pub fn all_entries(conn: &Connection) -> MigrateResult<Vec<LedgerEntry>> {
    let mut stmt = match conn
        .prepare("SELECT version, applied_at FROM schema_migrations ORDER BY applied_at ASC, id ASC")
    {
        Ok(stmt) => stmt,
        Err(e) if is_missing_ledger(&e) => return Ok(Vec::new()),
        Err(e) => {
            return Err(MigrateError::Persistence(format!(
                "failed to read ledger entries: {e}"
            )))
        }
    };
    let rows = stmt
        .query_map([], |row| {
            Ok(LedgerEntry {
                version: row.get(0)?,
                applied_at: row.get(1)?,
            })
        })
        .map_err(|e| MigrateError::Persistence(format!("failed to read ledger entries: {e}")))?;
    rows.collect::<Result<Vec<LedgerEntry>, _>>()
        .map_err(|e| MigrateError::Persistence(format!("failed to read ledger entries: {e}")))
}

/// The entry with the latest `applied_at`, or `None` when the ledger
/// is empty or absent. Used by rollback.
pub fn most_recent_entry(conn: &Connection) -> MigrateResult<Option<LedgerEntry>> {
    let result = conn.query_row(
        "SELECT version, applied_at FROM schema_migrations \
         ORDER BY applied_at DESC, id DESC LIMIT 1",
        [],
        |row| {
            Ok(LedgerEntry {
                version: row.get(0)?,
                applied_at: row.get(1)?,
            })
        },
    );
    match result {
        Ok(entry) => Ok(Some(entry)),
        Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) if is_missing_ledger(&e) => Ok(None),
        Err(e) => Err(MigrateError::Persistence(format!(
            "failed to read most recent entry: {e}"
        ))),
    }
}

/// Delete one ledger row by version.
pub fn remove_entry(conn: &Connection, version: &str) -> MigrateResult<()> {
    conn.execute(
        "DELETE FROM schema_migrations WHERE version = ?",
        duckdb::params![version],
    )
    .map_err(|e| {
        MigrateError::Persistence(format!("failed to remove ledger entry '{version}': {e}"))
    })?;
    Ok(())
}

/// Classify a DuckDB error as "the ledger table does not exist".
///
/// duckdb::Error does not expose structured variants, so string
/// matching is the only reliable approach. Narrow patterns keep
/// unrelated catalog errors from being swallowed.
fn is_missing_ledger(err: &duckdb::Error) -> bool {
    let msg = err.to_string();
    msg.contains("Table with name schema_migrations does not exist")
        || (msg.contains("Catalog Error")
            && msg.contains("schema_migrations")
            && msg.contains("not exist"))
}

#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;
