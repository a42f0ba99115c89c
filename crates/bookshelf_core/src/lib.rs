//! Core domain logic for the Bookshelf personal library catalog.
//! This crate is the single source of truth for book admission rules and
//! for the persisted, sortable book collection.

pub mod db;
pub mod library;
pub mod logging;
pub mod model;
pub mod storage;

pub use library::observer::{LibraryChange, LibraryObserver};
pub use library::sort::{SortMode, SortState};
pub use library::{GenreSection, Library};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::book::{Author, Book, BookDraft, BookError, BookId};
pub use model::form::{BookForm, FormError};
pub use model::genre::{default_genre, genres, GENRES};
pub use model::validate::{
    is_valid_author_name, is_valid_genre, is_valid_pages, is_valid_rating,
    is_valid_reading_time, is_valid_title, is_valid_year,
};
pub use storage::{
    LibraryStorage, MemoryLibraryStorage, SqliteLibraryStorage, StorageError, StorageResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
