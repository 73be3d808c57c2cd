//! Migration orchestration: pending-set computation, ordered apply,
//! status, and best-effort rollback.

use crate::error::{MigrateError, MigrateResult};
use crate::executor;
use crate::files::{self, MigrationFile};
use crate::ledger::{self, LedgerEntry};
use crate::validate::validate_files;
use bookstore_db::DbHandle;
use std::path::{Path, PathBuf};

/// Drives the migration lifecycle against one database.
///
/// Runs synchronously to completion; typically invoked once at process
/// startup or once per CLI invocation. Cross-process races are not
/// coordinated here — the ledger's UNIQUE version constraint makes the
/// losing process fail safely inside its own transaction.
pub struct Runner<'a> {
    db: &'a DbHandle,
    migrations_dir: PathBuf,
}

impl<'a> Runner<'a> {
    /// Create a runner over `db` reading migration files from
    /// `migrations_dir`.
    pub fn new(db: &'a DbHandle, migrations_dir: &Path) -> Self {
        Self {
            db,
            migrations_dir: migrations_dir.to_path_buf(),
        }
    }

    /// Discover, validate, and apply all pending migrations in order.
    ///
    /// Already-applied versions are skipped silently, so re-running is
    /// idempotent. Stops at the first failure: a later migration never
    /// applies before an earlier one that failed. A failed version
    /// stays pending (its transaction rolled back) and is retried on
    /// the next run.
    ///
    /// Returns the versions applied by this invocation.
    pub fn migrate(&self) -> MigrateResult<Vec<String>> {
        let files = self.discover()?;
        validate_files(&files)?;

        ledger::ensure_ledger_table(self.db.conn())?;
        let applied = ledger::applied_versions(self.db.conn())?;

        let mut newly_applied = Vec::new();
        for file in &files {
            if applied.contains(&file.version) {
                log::debug!("Skipping already-applied migration '{}'", file.version);
                continue;
            }
            executor::apply(self.db, file)?;
            newly_applied.push(file.version.clone());
        }
        Ok(newly_applied)
    }

    /// The pending set: discovered files not yet in the ledger, in
    /// application order. Validates nothing and applies nothing.
    pub fn pending(&self) -> MigrateResult<Vec<MigrationFile>> {
        let files = self.discover()?;
        let applied = ledger::applied_versions(self.db.conn())?;
        Ok(files
            .into_iter()
            .filter(|f| !applied.contains(&f.version))
            .collect())
    }

    /// All applied entries ordered by `applied_at` ascending.
    pub fn status(&self) -> MigrateResult<Vec<LedgerEntry>> {
        ledger::all_entries(self.db.conn())
    }

    /// Remove the most recently applied ledger entry.
    ///
    /// Does NOT execute any reverse DDL — the schema change stays in
    /// place. Rollback only un-marks a version so a corrected file can
    /// be reapplied. Fails with [`MigrateError::NothingToRollBack`]
    /// when the ledger is empty, leaving it untouched.
    ///
    /// Returns the removed entry.
    pub fn rollback_last(&self) -> MigrateResult<LedgerEntry> {
        let entry = ledger::most_recent_entry(self.db.conn())?
            .ok_or(MigrateError::NothingToRollBack)?;
        ledger::remove_entry(self.db.conn(), &entry.version)?;
        log::debug!("Rolled back ledger entry '{}'", entry.version);
        Ok(entry)
    }

    /// Validate every discovered file without touching the database.
    ///
    /// Returns the number of files checked.
    pub fn validate(&self) -> MigrateResult<usize> {
        let files = self.discover()?;
        validate_files(&files)?;
        Ok(files.len())
    }

    fn discover(&self) -> MigrateResult<Vec<MigrationFile>> {
        files::list_migration_files(&self.migrations_dir)
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
