//! SQLite-backed library storage.
//!
//! # Responsibility
//! - Persist each logical key as one JSON blob row in `library_blobs`.
//!
//! # Invariants
//! - Saves are upserts; a key has at most one row.
//! - Connections must come from `db::open_db*` so the table exists.

use super::{
    decode_blob, encode_blob, LibraryStorage, StorageResult, BOOKS_KEY, SORT_STATE_KEY,
};
use crate::library::sort::SortState;
use crate::model::book::Book;
use rusqlite::{params, Connection, OptionalExtension};

/// Blob storage over a borrowed, migrated SQLite connection.
pub struct SqliteLibraryStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLibraryStorage<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn read(&self, key: &'static str) -> StorageResult<Option<Vec<u8>>> {
        let bytes = self
            .conn
            .query_row(
                "SELECT value FROM library_blobs WHERE key = ?1;",
                [key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(bytes)
    }

    fn write(&self, key: &'static str, bytes: &[u8]) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO library_blobs (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, bytes],
        )?;
        Ok(())
    }
}

impl LibraryStorage for SqliteLibraryStorage<'_> {
    fn load_books(&self) -> StorageResult<Option<Vec<Book>>> {
        self.read(BOOKS_KEY)?
            .map(|bytes| decode_blob(BOOKS_KEY, &bytes))
            .transpose()
    }

    fn save_books(&mut self, books: &[Book]) -> StorageResult<()> {
        let bytes = encode_blob(books)?;
        self.write(BOOKS_KEY, &bytes)
    }

    fn load_sort_state(&self) -> StorageResult<Option<SortState>> {
        self.read(SORT_STATE_KEY)?
            .map(|bytes| decode_blob(SORT_STATE_KEY, &bytes))
            .transpose()
    }

    fn save_sort_state(&mut self, state: &SortState) -> StorageResult<()> {
        let bytes = encode_blob(state)?;
        self.write(SORT_STATE_KEY, &bytes)
    }
}
