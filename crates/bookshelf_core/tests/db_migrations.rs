use bookshelf_core::db::migrations::latest_version;
use bookshelf_core::db::{open_db, open_db_in_memory, DbError};
use bookshelf_core::storage::{BOOKS_KEY, SORT_STATE_KEY};
use bookshelf_core::{LibraryStorage, SortMode, SortState, SqliteLibraryStorage};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "library_blobs");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bookshelf.sqlite3");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "library_blobs");
}

#[test]
fn blob_rows_survive_reopen_and_keep_one_row_per_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bookshelf.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let mut storage = SqliteLibraryStorage::new(&conn);
        storage.save_books(&[]).unwrap();
        storage
            .save_sort_state(&SortState {
                mode: SortMode::TitleAsc,
                group_by_genre: true,
            })
            .unwrap();
        storage
            .save_sort_state(&SortState {
                mode: SortMode::DateAddedDesc,
                group_by_genre: false,
            })
            .unwrap();
    }

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    assert_eq!(blob_row_count(&conn, SORT_STATE_KEY), 1);
    assert_eq!(blob_row_count(&conn, BOOKS_KEY), 1);

    let storage = SqliteLibraryStorage::new(&conn);
    let state = storage.load_sort_state().unwrap().unwrap();
    assert_eq!(state.mode, SortMode::DateAddedDesc);
    assert!(!state.group_by_genre);
    assert_eq!(storage.load_books().unwrap(), Some(Vec::new()));
}

#[test]
fn blob_rows_get_a_default_updated_at() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO library_blobs (key, value) VALUES (?1, ?2);",
        rusqlite::params!["books", b"[]".to_vec()],
    )
    .unwrap();

    let updated_at: i64 = conn
        .query_row(
            "SELECT updated_at FROM library_blobs WHERE key = 'books';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert!(updated_at > 0);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

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

#[test]
fn opening_inside_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("bookshelf.sqlite3");

    let err = open_db(&path).unwrap_err();
    assert!(matches!(err, DbError::Sqlite(_)));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn blob_row_count(conn: &Connection, key: &str) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM library_blobs WHERE key = ?1;",
        [key],
        |row| row.get(0),
    )
    .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
