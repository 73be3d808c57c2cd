//! Tests for DbHandle open and transaction behavior.

use super::*;

/// Query a single i64 value (convenience for COUNT(*) assertions).
fn count(db: &DbHandle, sql: &str) -> i64 {
    db.conn()
        .query_row(sql, [], |row| row.get::<_, i64>(0))
        .unwrap()
}

#[test]
fn open_in_memory_succeeds() {
    let db = DbHandle::open_in_memory().unwrap();
    assert_eq!(count(&db, "SELECT 1"), 1);
}

#[test]
fn open_file_creates_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.duckdb");
    assert!(!path.exists());
    let _db = DbHandle::open(&path).unwrap();
    assert!(path.exists());
}

#[test]
fn new_handles_memory_special_case() {
    let db = DbHandle::new(":memory:").unwrap();
    assert_eq!(count(&db, "SELECT 1"), 1);
}

#[test]
fn transaction_commits_on_success() {
    let db = DbHandle::open_in_memory().unwrap();
    db.conn()
        .execute_batch("CREATE TABLE t (id INTEGER)")
        .unwrap();

    db.transaction::<_, DbError, _>(|conn| {
        conn.execute("INSERT INTO t VALUES (1)", [])?;
        Ok(())
    })
    .unwrap();

    assert_eq!(count(&db, "SELECT COUNT(*) FROM t"), 1);
}

#[test]
fn transaction_rolls_back_on_error() {
    let db = DbHandle::open_in_memory().unwrap();
    db.conn()
        .execute_batch("CREATE TABLE t (id INTEGER)")
        .unwrap();

    let result: DbResult<()> = db.transaction(|conn| {
        conn.execute("INSERT INTO t VALUES (1)", [])?;
        Err(DbError::ExecutionError("intentional failure".into()))
    });

    assert!(result.is_err());
    assert_eq!(
        count(&db, "SELECT COUNT(*) FROM t"),
        0,
        "Row should have been rolled back"
    );
}

#[test]
fn transaction_rolls_back_ddl() {
    let db = DbHandle::open_in_memory().unwrap();

    let result: DbResult<()> = db.transaction(|conn| {
        conn.execute_batch("CREATE TABLE half_done (id INTEGER)")?;
        Err(DbError::ExecutionError("abort".into()))
    });

    assert!(result.is_err());
    let exists = count(
        &db,
        "SELECT COUNT(*) FROM information_schema.tables WHERE table_name = 'half_done'",
    );
    assert_eq!(exists, 0, "DDL should have been rolled back");
}
