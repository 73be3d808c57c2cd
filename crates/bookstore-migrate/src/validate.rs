//! Shallow validation of discovered migration files.

use crate::error::{MigrateError, MigrateResult};
use crate::files::MigrationFile;

/// Confirm every file has non-empty trimmed content.
///
/// Validation is intentionally shallow: no SQL parsing or linting,
/// just file presence and non-emptiness. Must succeed before any
/// migration is applied.
pub fn validate_files(files: &[MigrationFile]) -> MigrateResult<()> {
    for file in files {
        if file.raw_sql.trim().is_empty() {
            return Err(MigrateError::EmptyFile {
                path: file.path.display().to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
