//! Applies one migration inside a transaction.

use crate::error::{MigrateError, MigrateResult};
use crate::files::MigrationFile;
use crate::ledger;
use bookstore_db::DbHandle;
use chrono::Utc;

/// Apply `file` and record it in the ledger, atomically.
///
/// Opens a transaction, executes the file's SQL verbatim, inserts the
/// ledger row, and commits. On any failure the whole transaction rolls
/// back so that neither the schema change nor the ledger row persists:
/// a migration is either fully applied-and-recorded or entirely
/// absent, never half-applied.
pub fn apply(db: &DbHandle, file: &MigrationFile) -> MigrateResult<()> {
    let applied_at = Utc::now().to_rfc3339();
    log::debug!("Applying migration '{}'", file.version);

    db.transaction(|conn| {
        conn.execute_batch(&file.raw_sql)
            .map_err(|e| MigrateError::Execution {
                version: file.version.clone(),
                message: e.to_string(),
            })?;
        ledger::record_applied(conn, &file.version, &applied_at)?;
        Ok(())
    })
}

#[cfg(test)]
#[path = "executor_test.rs"]
mod tests;
