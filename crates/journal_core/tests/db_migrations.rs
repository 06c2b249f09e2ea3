use journal_core::db::migrations::{current_user_version, ensure_schema, latest_version};
use journal_core::db::{open_db, open_db_in_memory, DbError};
use journal_core::{EntryRepository, SqliteEntryRepository};
use chrono::NaiveDate;
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_schema() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(current_user_version(&conn).unwrap(), latest_version());
    assert_object_exists(&conn, "table", "entries");
    assert_object_exists(&conn, "index", "idx_entries_date");
}

#[test]
fn ensure_schema_is_idempotent() {
    let mut conn = open_db_in_memory().unwrap();
    ensure_schema(&mut conn).unwrap();
    ensure_schema(&mut conn).unwrap();
    assert_eq!(current_user_version(&conn).unwrap(), latest_version());
}

#[test]
fn reopening_file_database_keeps_entries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("journal.sqlite3");
    let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

    let mut conn_first = open_db(&path).unwrap();
    SqliteEntryRepository::try_new(&mut conn_first)
        .unwrap()
        .save(date, "first open")
        .unwrap();
    drop(conn_first);

    let mut conn_second = open_db(&path).unwrap();
    let repo = SqliteEntryRepository::try_new(&mut conn_second).unwrap();
    let loaded = repo.get(date).unwrap().unwrap();
    assert_eq!(loaded.entry, "first open");
}

#[test]
fn unversioned_database_with_existing_table_is_adopted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date DATE UNIQUE,
            entry TEXT
        );
        INSERT INTO entries (date, entry) VALUES ('2023-07-04', 'fireworks');
        INSERT INTO entries (date, entry) VALUES ('2023-07-05', NULL);",
    )
    .unwrap();
    drop(conn);

    let mut conn = open_db(&path).unwrap();
    assert_eq!(current_user_version(&conn).unwrap(), latest_version());
    let repo = SqliteEntryRepository::try_new(&mut conn).unwrap();
    let entries = repo
        .get_range(
            NaiveDate::from_ymd_opt(2023, 7, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 7, 31).unwrap(),
        )
        .unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].entry, "fireworks");
    assert_eq!(entries[1].entry, "");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn assert_object_exists(conn: &Connection, kind: &str, name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = ?1 AND name = ?2
            );",
            [kind, name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "{kind} {name} does not exist");
}
