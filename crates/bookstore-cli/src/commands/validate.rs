//! Validate command implementation - check migration files only
//!
//! Never opens the database: validation is file presence and
//! non-emptiness, nothing more.

use anyhow::Result;
use bookstore_migrate::files::list_migration_files;
use bookstore_migrate::validate::validate_files;

use crate::cli::{GlobalArgs, ValidateArgs};
use crate::commands::common::{load_config, ExitCode};

/// Execute the validate command
pub fn execute(_args: &ValidateArgs, global: &GlobalArgs) -> Result<()> {
    let (config, root) = load_config(global)?;
    let migrations_dir = config.migration_path_absolute(&root);

    if global.verbose {
        eprintln!(
            "[verbose] Validating migrations in {}",
            migrations_dir.display()
        );
    }

    let result = list_migration_files(&migrations_dir).and_then(|files| {
        validate_files(&files)?;
        Ok(files.len())
    });

    match result {
        Ok(0) => {
            println!("No migration files found");
            Ok(())
        }
        Ok(count) => {
            println!("All {} migration file(s) are valid", count);
            Ok(())
        }
        Err(e) => {
            eprintln!("  \u{2717} {}", e);
            Err(ExitCode(1).into())
        }
    }
}
