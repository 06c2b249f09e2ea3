use chrono::NaiveDate;
use journal_core::db::open_db_in_memory;
use journal_core::{EntryRecord, EntryRepository, RepoError, SqliteEntryRepository};
use rusqlite::Connection;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn row_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM entries;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn save_then_get_range_returns_single_record() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteEntryRepository::try_new(&mut conn).unwrap();
    let day = date(2024, 3, 4);

    repo.save(day, "walked to the lake").unwrap();

    let entries = repo.get_range(day, day).unwrap();
    assert_eq!(entries, vec![EntryRecord::new(day, "walked to the lake")]);
}

#[test]
fn save_twice_overwrites_without_duplicates() {
    let mut conn = open_db_in_memory().unwrap();
    let day = date(2024, 3, 4);
    {
        let mut repo = SqliteEntryRepository::try_new(&mut conn).unwrap();
        repo.save(day, "draft").unwrap();
        repo.save(day, "final").unwrap();

        let entries = repo.get_range(day, day).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entry, "final");
    }
    assert_eq!(row_count(&conn), 1);
}

#[test]
fn empty_text_is_stored_not_deleted() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteEntryRepository::try_new(&mut conn).unwrap();
    let day = date(2024, 1, 1);

    repo.save(day, "something").unwrap();
    repo.save(day, "").unwrap();

    let loaded = repo.get(day).unwrap().unwrap();
    assert_eq!(loaded.entry, "");
}

#[test]
fn delete_missing_date_is_noop() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let mut repo = SqliteEntryRepository::try_new(&mut conn).unwrap();
        repo.save(date(2024, 1, 2), "keep me").unwrap();
        assert!(repo.delete(date(2024, 1, 3)).unwrap());
        assert!(repo.delete(date(2024, 1, 3)).unwrap());
    }
    assert_eq!(row_count(&conn), 1);
}

#[test]
fn delete_removes_only_the_given_date() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteEntryRepository::try_new(&mut conn).unwrap();
    repo.save(date(2024, 1, 2), "two").unwrap();
    repo.save(date(2024, 1, 3), "three").unwrap();

    repo.delete(date(2024, 1, 2)).unwrap();

    assert!(repo.get(date(2024, 1, 2)).unwrap().is_none());
    assert_eq!(repo.get(date(2024, 1, 3)).unwrap().unwrap().entry, "three");
}

#[test]
fn reversed_range_is_empty() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteEntryRepository::try_new(&mut conn).unwrap();
    repo.save(date(2024, 2, 10), "inside").unwrap();

    let entries = repo.get_range(date(2024, 2, 28), date(2024, 2, 1)).unwrap();
    assert!(entries.is_empty());
}

#[test]
fn range_without_records_is_empty() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&mut conn).unwrap();

    let entries = repo.get_range(date(2030, 1, 1), date(2030, 12, 31)).unwrap();
    assert!(entries.is_empty());
}

#[test]
fn range_is_inclusive_and_chronological_across_month_boundary() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteEntryRepository::try_new(&mut conn).unwrap();
    repo.save(date(2024, 2, 1), "february").unwrap();
    repo.save(date(2024, 1, 31), "january").unwrap();
    repo.save(date(2024, 2, 2), "outside").unwrap();
    repo.save(date(2023, 12, 31), "outside too").unwrap();

    let entries = repo.get_range(date(2024, 1, 31), date(2024, 2, 1)).unwrap();
    let dates: Vec<NaiveDate> = entries.iter().map(|record| record.date).collect();
    assert_eq!(dates, vec![date(2024, 1, 31), date(2024, 2, 1)]);
}

#[test]
fn unicode_and_newlines_round_trip() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteEntryRepository::try_new(&mut conn).unwrap();
    let day = date(2024, 7, 14);
    let text = "Café ☕ with 友達\nsecond line\r\n\tindented — done 🎉";

    repo.save(day, text).unwrap();

    let entries = repo.get_range(day, day).unwrap();
    assert_eq!(entries[0].entry, text);
}

#[test]
fn dates_are_stored_in_canonical_form() {
    let mut conn = open_db_in_memory().unwrap();
    SqliteEntryRepository::try_new(&mut conn)
        .unwrap()
        .save(date(2024, 3, 4), "x")
        .unwrap();

    let stored: String = conn
        .query_row("SELECT date FROM entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(stored, "2024-03-04");
}

#[test]
fn constraint_failure_rolls_back_and_is_swallowed() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TRIGGER reject_locked_day
         BEFORE INSERT ON entries
         WHEN NEW.date = '2024-12-25'
         BEGIN
             SELECT RAISE(ABORT, 'day is locked');
         END;",
    )
    .unwrap();

    {
        let mut repo = SqliteEntryRepository::try_new(&mut conn).unwrap();
        assert!(!repo.save(date(2024, 12, 25), "blocked").unwrap());
        assert!(repo.save(date(2024, 12, 24), "allowed").unwrap());
        assert!(repo.get(date(2024, 12, 25)).unwrap().is_none());
    }
    assert_eq!(row_count(&conn), 1);
}

#[test]
fn storage_failure_is_surfaced() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute_batch("DROP TABLE entries;").unwrap();

    // Schema version is already current, so the table is not recreated.
    let mut repo = SqliteEntryRepository::try_new(&mut conn).unwrap();
    let save_err = repo.save(date(2024, 1, 1), "lost").unwrap_err();
    assert!(matches!(save_err, RepoError::Db(_)));

    let range_err = repo.get_range(date(2024, 1, 1), date(2024, 1, 2)).unwrap_err();
    assert!(matches!(range_err, RepoError::Db(_)));
}

#[test]
fn malformed_stored_date_is_reported() {
    let mut conn = open_db_in_memory().unwrap();
    // Sorts between the query bounds lexically.
    conn.execute(
        "INSERT INTO entries (date, entry) VALUES ('2024-01-1x', 'bad');",
        [],
    )
    .unwrap();

    let repo = SqliteEntryRepository::try_new(&mut conn).unwrap();
    let err = repo.get_range(date(2024, 1, 1), date(2024, 1, 31)).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn entry_record_serializes_canonical_date() {
    let record = EntryRecord::new(date(2024, 2, 29), "leap");
    let json = serde_json::to_string(&record).unwrap();
    assert_eq!(json, r#"{"date":"2024-02-29","entry":"leap"}"#);
}

#[test]
fn years_beyond_four_digits_are_rejected_and_ranges_clamped() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let mut repo = SqliteEntryRepository::try_new(&mut conn).unwrap();
        repo.save(date(9999, 12, 31), "last storable day").unwrap();

        let err = repo.save(date(10000, 1, 1), "too far").unwrap_err();
        assert!(matches!(err, RepoError::UnsupportedDate(d) if d == date(10000, 1, 1)));
        assert!(matches!(
            repo.save(date(-1, 12, 31), "too early").unwrap_err(),
            RepoError::UnsupportedDate(_)
        ));

        let entries = repo.get_range(date(9999, 12, 31), date(10000, 1, 1)).unwrap();
        assert_eq!(entries, vec![EntryRecord::new(date(9999, 12, 31), "last storable day")]);

        let entries = repo.get_range(date(-5, 1, 1), date(9999, 12, 31)).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(repo.get_range(date(10000, 1, 1), date(10001, 1, 1)).unwrap().is_empty());
        assert!(repo.delete(date(10000, 1, 1)).unwrap());
    }
    assert_eq!(row_count(&conn), 1);
}
