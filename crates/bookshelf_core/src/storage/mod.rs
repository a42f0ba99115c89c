//! Persistence port for the library.
//!
//! # Responsibility
//! - Define the contract the library uses to load and save its state.
//! - Provide the JSON blob codec shared by every implementation.
//!
//! # Invariants
//! - Exactly two logical keys exist: the book sequence and the sort state.
//! - A missing key loads as `None`; a present but undecodable key is an
//!   error, and the caller decides how to degrade.
//! - Book order is persisted implicitly as array order.

use crate::db::DbError;
use crate::library::sort::SortState;
use crate::model::book::Book;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryLibraryStorage;
pub use sqlite::SqliteLibraryStorage;

/// Key of the serialized book sequence.
pub const BOOKS_KEY: &str = "books";
/// Key of the serialized sort state.
pub const SORT_STATE_KEY: &str = "sort_state";

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure raised by a storage implementation.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    Encode(serde_json::Error),
    Decode {
        key: &'static str,
        source: serde_json::Error,
    },
    /// Raised by the in-memory fake when writes are switched off.
    Unavailable,
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode library blob: {err}"),
            Self::Decode { key, source } => {
                write!(f, "failed to decode library blob `{key}`: {source}")
            }
            Self::Unavailable => write!(f, "library storage is unavailable"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Decode { source, .. } => Some(source),
            Self::Unavailable => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract consumed by `Library`.
pub trait LibraryStorage {
    /// Loads the persisted book sequence, in persisted order.
    fn load_books(&self) -> StorageResult<Option<Vec<Book>>>;
    /// Replaces the persisted book sequence.
    fn save_books(&mut self, books: &[Book]) -> StorageResult<()>;
    fn load_sort_state(&self) -> StorageResult<Option<SortState>>;
    fn save_sort_state(&mut self, state: &SortState) -> StorageResult<()>;
}

pub(crate) fn encode_blob<T: Serialize + ?Sized>(value: &T) -> StorageResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(StorageError::Encode)
}

pub(crate) fn decode_blob<T: DeserializeOwned>(
    key: &'static str,
    bytes: &[u8],
) -> StorageResult<T> {
    serde_json::from_slice(bytes).map_err(|source| StorageError::Decode { key, source })
}
