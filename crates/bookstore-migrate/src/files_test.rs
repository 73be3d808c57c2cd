//! Tests for migration file discovery and ordering.

use super::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn missing_directory_yields_empty_list() {
    let dir = tempdir().unwrap();
    let files = list_migration_files(&dir.path().join("no_such_dir")).unwrap();
    assert!(files.is_empty());
}

#[test]
fn empty_directory_yields_empty_list() {
    let dir = tempdir().unwrap();
    let files = list_migration_files(dir.path()).unwrap();
    assert!(files.is_empty());
}

#[test]
fn files_sorted_lexicographically_regardless_of_creation_order() {
    let dir = tempdir().unwrap();
    // Deliberately created out of order
    fs::write(dir.path().join("001_authors.sql"), "CREATE TABLE a (x INT)").unwrap();
    fs::write(dir.path().join("003_books.sql"), "CREATE TABLE b (x INT)").unwrap();
    fs::write(dir.path().join("002_categories.sql"), "CREATE TABLE c (x INT)").unwrap();

    let files = list_migration_files(dir.path()).unwrap();
    let versions: Vec<&str> = files.iter().map(|f| f.version.as_str()).collect();
    assert_eq!(versions, ["001_authors", "002_categories", "003_books"]);
}

#[test]
fn hidden_and_non_sql_files_excluded() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("001_authors.sql"), "CREATE TABLE a (x INT)").unwrap();
    fs::write(dir.path().join(".hidden.sql"), "SELECT 1").unwrap();
    fs::write(dir.path().join("README.md"), "notes").unwrap();
    fs::write(dir.path().join("002_books.sql.bak"), "SELECT 1").unwrap();
    fs::create_dir(dir.path().join("archive.sql")).unwrap();

    let files = list_migration_files(dir.path()).unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].version, "001_authors");
}

#[test]
fn version_and_content_read_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("005_add_isbn.sql");
    fs::write(&path, "ALTER TABLE books ADD COLUMN isbn VARCHAR;").unwrap();

    let files = list_migration_files(dir.path()).unwrap();
    assert_eq!(files[0].version, "005_add_isbn");
    assert_eq!(files[0].raw_sql, "ALTER TABLE books ADD COLUMN isbn VARCHAR;");
    assert_eq!(files[0].path, path);
}
