//! End-to-end runner tests: idempotence, ordering, failure isolation,
//! status, and rollback.

use super::*;
use bookstore_db::DbHandle;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn memory_db() -> DbHandle {
    DbHandle::open_in_memory().unwrap()
}

fn write_migration(dir: &Path, name: &str, sql: &str) {
    fs::write(dir.join(name), sql).unwrap();
}

/// A three-file catalog schema, written to disk out of version order.
fn catalog_fixture() -> TempDir {
    let dir = tempdir().unwrap();
    write_migration(
        dir.path(),
        "001_create_authors_table.sql",
        "CREATE TABLE IF NOT EXISTS authors (id INTEGER PRIMARY KEY, name VARCHAR NOT NULL)",
    );
    write_migration(
        dir.path(),
        "003_create_books_table.sql",
        "CREATE TABLE IF NOT EXISTS books (id INTEGER PRIMARY KEY, title VARCHAR NOT NULL, \
         author_id INTEGER, category_id INTEGER)",
    );
    write_migration(
        dir.path(),
        "002_create_categories_table.sql",
        "CREATE TABLE IF NOT EXISTS categories (id INTEGER PRIMARY KEY, name VARCHAR NOT NULL)",
    );
    dir
}

fn table_exists(db: &DbHandle, name: &str) -> bool {
    let count: i64 = db
        .conn()
        .query_row(
            &format!(
                "SELECT COUNT(*) FROM information_schema.tables WHERE table_name = '{name}'"
            ),
            [],
            |row| row.get(0),
        )
        .unwrap();
    count == 1
}

#[test]
fn migrate_applies_in_lexicographic_order() {
    let db = memory_db();
    let dir = catalog_fixture();
    let runner = Runner::new(&db, dir.path());

    let applied = runner.migrate().unwrap();
    assert_eq!(
        applied,
        [
            "001_create_authors_table",
            "002_create_categories_table",
            "003_create_books_table"
        ]
    );
    assert!(table_exists(&db, "authors"));
    assert!(table_exists(&db, "categories"));
    assert!(table_exists(&db, "books"));
}

#[test]
fn second_migrate_run_is_a_no_op() {
    let db = memory_db();
    let dir = catalog_fixture();
    let runner = Runner::new(&db, dir.path());

    assert_eq!(runner.migrate().unwrap().len(), 3);
    assert_eq!(runner.migrate().unwrap().len(), 0, "pending set is empty");
    assert_eq!(runner.status().unwrap().len(), 3);
}

#[test]
fn absent_directory_migrates_zero_and_status_is_empty() {
    let db = memory_db();
    let dir = tempdir().unwrap();
    let runner = Runner::new(&db, &dir.path().join("does_not_exist"));

    assert!(runner.migrate().unwrap().is_empty());
    assert!(runner.status().unwrap().is_empty());
}

#[test]
fn status_ordered_by_applied_at_ascending() {
    let db = memory_db();
    let dir = catalog_fixture();
    let runner = Runner::new(&db, dir.path());
    runner.migrate().unwrap();

    let entries = runner.status().unwrap();
    assert_eq!(entries.len(), 3);
    for pair in entries.windows(2) {
        assert!(
            pair[0].applied_at <= pair[1].applied_at,
            "entries must be ascending by applied_at"
        );
    }
    assert_eq!(entries[0].version, "001_create_authors_table");
    assert_eq!(entries[2].version, "003_create_books_table");
}

#[test]
fn migrate_stops_at_first_failure() {
    let db = memory_db();
    let dir = tempdir().unwrap();
    write_migration(dir.path(), "001_authors.sql", "CREATE TABLE authors (id INTEGER)");
    write_migration(dir.path(), "002_broken.sql", "INSERT INTO no_such_table VALUES (1)");
    write_migration(dir.path(), "003_books.sql", "CREATE TABLE books (id INTEGER)");
    let runner = Runner::new(&db, dir.path());

    let err = runner.migrate().unwrap_err();
    assert!(matches!(err, MigrateError::Execution { ref version, .. } if version == "002_broken"));

    // 001 applied, 002 rolled back, 003 never attempted
    assert!(table_exists(&db, "authors"));
    assert!(!table_exists(&db, "books"));
    let entries = runner.status().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].version, "001_authors");

    // The failed version stays pending and is retried next run
    let pending: Vec<String> = runner
        .pending()
        .unwrap()
        .into_iter()
        .map(|f| f.version)
        .collect();
    assert_eq!(pending, ["002_broken", "003_books"]);
}

#[test]
fn validation_failure_aborts_before_anything_runs() {
    let db = memory_db();
    let dir = tempdir().unwrap();
    write_migration(dir.path(), "001_authors.sql", "CREATE TABLE authors (id INTEGER)");
    write_migration(dir.path(), "002_empty.sql", "");
    let runner = Runner::new(&db, dir.path());

    let err = runner.migrate().unwrap_err();
    assert!(matches!(err, MigrateError::EmptyFile { .. }));
    assert!(!table_exists(&db, "authors"), "no migration may run");
    assert!(runner.status().unwrap().is_empty());
}

#[test]
fn validate_reports_count_without_touching_database() {
    let db = memory_db();
    let dir = catalog_fixture();
    let runner = Runner::new(&db, dir.path());

    assert_eq!(runner.validate().unwrap(), 3);
    assert!(!table_exists(&db, "authors"));
    assert!(!table_exists(&db, "schema_migrations"));
}

#[test]
fn rollback_on_empty_ledger_fails_and_leaves_it_untouched() {
    let db = memory_db();
    let dir = tempdir().unwrap();
    let runner = Runner::new(&db, dir.path());

    assert!(matches!(
        runner.rollback_last(),
        Err(MigrateError::NothingToRollBack)
    ));
    assert!(runner.status().unwrap().is_empty());
}

#[test]
fn rollback_removes_only_the_most_recent_entry() {
    let db = memory_db();
    let dir = catalog_fixture();
    let runner = Runner::new(&db, dir.path());
    runner.migrate().unwrap();

    let removed = runner.rollback_last().unwrap();
    assert_eq!(removed.version, "003_create_books_table");

    let versions: Vec<String> = runner
        .status()
        .unwrap()
        .into_iter()
        .map(|e| e.version)
        .collect();
    assert_eq!(
        versions,
        ["001_create_authors_table", "002_create_categories_table"]
    );

    // The schema change itself is left in place: unmark-only semantics
    assert!(table_exists(&db, "books"));
}

#[test]
fn rolled_back_idempotent_migration_is_reapplied() {
    let db = memory_db();
    let dir = catalog_fixture();
    let runner = Runner::new(&db, dir.path());
    runner.migrate().unwrap();
    runner.rollback_last().unwrap();

    // Fixture DDL uses IF NOT EXISTS, so reapplying succeeds
    let applied = runner.migrate().unwrap();
    assert_eq!(applied, ["003_create_books_table"]);
    assert_eq!(runner.status().unwrap().len(), 3);
}

#[test]
fn rolled_back_non_idempotent_migration_fails_on_reapply() {
    let db = memory_db();
    let dir = tempdir().unwrap();
    write_migration(dir.path(), "001_authors.sql", "CREATE TABLE authors (id INTEGER)");
    let runner = Runner::new(&db, dir.path());
    runner.migrate().unwrap();
    runner.rollback_last().unwrap();

    // Plain CREATE TABLE hits the still-present table: duplicate-object
    // error is the documented consequence of unmark-only rollback
    let err = runner.migrate().unwrap_err();
    assert!(matches!(err, MigrateError::Execution { .. }));
}
