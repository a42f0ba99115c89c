//! In-process storage fake.
//!
//! Keeps the same encoded blobs a real store would write, so decode paths
//! are exercised exactly as with SQLite.

use super::{
    decode_blob, encode_blob, LibraryStorage, StorageError, StorageResult, BOOKS_KEY,
    SORT_STATE_KEY,
};
use crate::library::sort::SortState;
use crate::model::book::Book;
use std::collections::BTreeMap;

/// Blob map held in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryLibraryStorage {
    blobs: BTreeMap<&'static str, Vec<u8>>,
    fail_writes: bool,
    save_count: usize,
}

impl MemoryLibraryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds raw bytes under `key`, e.g. a corrupted blob.
    pub fn with_blob(mut self, key: &'static str, bytes: impl Into<Vec<u8>>) -> Self {
        self.blobs.insert(key, bytes.into());
        self
    }

    /// Raw bytes currently stored under `key`.
    pub fn blob(&self, key: &str) -> Option<&[u8]> {
        self.blobs.get(key).map(Vec::as_slice)
    }

    /// When `true`, every save fails with `StorageError::Unavailable`.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of successful saves across both keys.
    pub fn save_count(&self) -> usize {
        self.save_count
    }

    fn put(&mut self, key: &'static str, bytes: Vec<u8>) -> StorageResult<()> {
        if self.fail_writes {
            return Err(StorageError::Unavailable);
        }
        self.blobs.insert(key, bytes);
        self.save_count += 1;
        Ok(())
    }
}

impl LibraryStorage for MemoryLibraryStorage {
    fn load_books(&self) -> StorageResult<Option<Vec<Book>>> {
        self.blobs
            .get(BOOKS_KEY)
            .map(|bytes| decode_blob(BOOKS_KEY, bytes))
            .transpose()
    }

    fn save_books(&mut self, books: &[Book]) -> StorageResult<()> {
        let bytes = encode_blob(books)?;
        self.put(BOOKS_KEY, bytes)
    }

    fn load_sort_state(&self) -> StorageResult<Option<SortState>> {
        self.blobs
            .get(SORT_STATE_KEY)
            .map(|bytes| decode_blob(SORT_STATE_KEY, bytes))
            .transpose()
    }

    fn save_sort_state(&mut self, state: &SortState) -> StorageResult<()> {
        let bytes = encode_blob(state)?;
        self.put(SORT_STATE_KEY, bytes)
    }
}
