//! Rollback command implementation - un-mark the newest ledger entry
//!
//! No reverse DDL is executed; the schema change stays in place so a
//! corrected migration file can be reapplied.

use anyhow::Result;
use bookstore_migrate::{MigrateError, Runner};

use crate::cli::{GlobalArgs, RollbackArgs};
use crate::commands::common::{load_config, open_database, ExitCode};

/// Execute the rollback command
pub fn execute(_args: &RollbackArgs, global: &GlobalArgs) -> Result<()> {
    let (config, root) = load_config(global)?;
    let migrations_dir = config.migration_path_absolute(&root);
    let db = open_database(&config, global)?;
    let runner = Runner::new(&db, &migrations_dir);

    match runner.rollback_last() {
        Ok(entry) => {
            println!(
                "  \u{2713} Rolled back '{}' (was applied at: {})",
                entry.version, entry.applied_at
            );
            println!("Rollback completed successfully");
            Ok(())
        }
        Err(MigrateError::NothingToRollBack) => {
            eprintln!("  \u{2717} Nothing to roll back");
            Err(ExitCode(1).into())
        }
        Err(e) => {
            eprintln!("  \u{2717} {}", e);
            Err(ExitCode(1).into())
        }
    }
}
