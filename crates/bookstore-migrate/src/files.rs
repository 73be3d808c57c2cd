//! Migration file discovery.
//!
//! Scans a single directory (non-recursive) for `<version>.sql` files
//! and returns them sorted lexicographically by version. The naming
//! convention is a zero-padded sequence number plus a descriptive
//! suffix (`003_create_books_table.sql`), which makes lexicographic
//! order coincide with chronological intent.

use crate::error::{MigrateError, MigrateResult};
use std::path::{Path, PathBuf};

/// One unit of schema change: a versioned SQL file.
#[derive(Debug, Clone)]
pub struct MigrationFile {
    /// Version identifier derived from the filename stem,
    /// e.g. `003_create_books_table`. Unique across the store.
    pub version: String,
    /// Full file content, executed verbatim.
    pub raw_sql: String,
    /// Source path, kept for error messages.
    pub path: PathBuf,
}

/// List migration files in `dir`, sorted ascending by version.
///
/// Keeps entries whose name ends with `.sql` and does not begin with a
/// dot. A missing directory yields an empty list — migrations are
/// optional — while an unreadable one is a [`MigrateError::Discovery`].
pub fn list_migration_files(dir: &Path) -> MigrateResult<Vec<MigrationFile>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("Migrations directory {} not found", dir.display());
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(MigrateError::Discovery {
                path: dir.display().to_string(),
                message: e.to_string(),
            })
        }
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| MigrateError::Discovery {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        let Some(version) = name.strip_suffix(".sql") else {
            continue;
        };

        let version = version.to_string();
        let raw_sql = std::fs::read_to_string(&path).map_err(|e| MigrateError::Discovery {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        files.push(MigrationFile {
            version,
            raw_sql,
            path,
        });
    }

    files.sort_by(|a, b| a.version.cmp(&b.version));
    Ok(files)
}

#[cfg(test)]
#[path = "files_test.rs"]
mod tests;
