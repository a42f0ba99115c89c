//! In-memory book collection with best-effort persistence.
//!
//! # Responsibility
//! - Own the ordered book sequence and the persisted sort state.
//! - Apply add/remove/edit/sort mutations and persist after each one.
//! - Answer read-time grouping queries (used genres, genre sections).
//!
//! # Invariants
//! - Books are admitted already validated; the library never re-validates.
//! - Sequence order is the last applied sort and is persisted as-is.
//! - Edits never reorder the sequence; observers get `Edited` instead.
//! - Out-of-range indexes are no-ops, and persistence failures are logged
//!   and swallowed. No library operation fails because of storage.

pub mod observer;
pub mod sort;

use crate::model::book::{Book, BookDraft, BookError, BookId};
use crate::storage::LibraryStorage;
use log::{debug, info, warn};
use observer::{LibraryChange, LibraryObserver};
use sort::{SortMode, SortState};
use std::collections::BTreeSet;
use std::fmt::{Debug, Formatter};

/// Books of one genre, as shown in a sectioned list.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreSection<'a> {
    pub genre: String,
    /// `(sequence index, book)` pairs in sequence order.
    pub entries: Vec<(usize, &'a Book)>,
}

/// The single owner of the catalog.
pub struct Library<S: LibraryStorage> {
    books: Vec<Book>,
    sort_state: SortState,
    storage: S,
    observers: Vec<Box<dyn LibraryObserver>>,
}

impl<S: LibraryStorage> Debug for Library<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("books", &self.books.len())
            .field("sort_state", &self.sort_state)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl<S: LibraryStorage> Library<S> {
    /// Restores the library from `storage`.
    ///
    /// Missing or undecodable state degrades to an empty sequence and the
    /// default sort state; this never fails.
    pub fn load(storage: S) -> Self {
        let books = match storage.load_books() {
            Ok(Some(books)) => books,
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!("event=library_load module=library status=degraded part=books error={err}");
                Vec::new()
            }
        };
        let sort_state = match storage.load_sort_state() {
            Ok(Some(state)) => state,
            Ok(None) => SortState::default(),
            Err(err) => {
                warn!(
                    "event=library_load module=library status=degraded part=sort_state error={err}"
                );
                SortState::default()
            }
        };

        info!(
            "event=library_load module=library status=ok count={} sort_mode={:?}",
            books.len(),
            sort_state.mode
        );

        Self {
            books,
            sort_state,
            storage,
            observers: Vec::new(),
        }
    }

    /// Registers an observer for subsequent changes.
    pub fn subscribe(&mut self, observer: impl LibraryObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Read-only view of the sequence in its current order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn get(&self, index: usize) -> Option<&Book> {
        self.books.get(index)
    }

    /// Current sequence index of the book with `id`.
    pub fn position_of(&self, id: BookId) -> Option<usize> {
        self.books.iter().position(|book| book.id() == id)
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_state.mode
    }

    pub fn group_by_genre(&self) -> bool {
        self.sort_state.group_by_genre
    }

    /// Appends `book` and persists the sequence.
    pub fn add(&mut self, book: Book) {
        let id = book.id();
        self.books.push(book);
        let index = self.books.len() - 1;

        debug!("event=book_add module=library status=ok index={index} book_id={id}");
        self.persist_books();
        self.notify(LibraryChange::Added { index, id });
    }

    /// Removes and returns the book at `index`.
    ///
    /// An out-of-range index leaves both the sequence and storage untouched
    /// and returns `None`.
    pub fn remove_at(&mut self, index: usize) -> Option<Book> {
        if index >= self.books.len() {
            warn!(
                "event=book_remove module=library status=ignored reason=index_out_of_range index={index} len={}",
                self.books.len()
            );
            return None;
        }

        let removed = self.books.remove(index);
        let id = removed.id();
        debug!("event=book_remove module=library status=ok index={index} book_id={id}");
        self.persist_books();
        self.notify(LibraryChange::Removed { index, id });
        Some(removed)
    }

    /// Validates `draft` and applies it in place to the book at `index`.
    ///
    /// Returns `Ok(false)` when `index` is out of range.
    ///
    /// # Errors
    /// - Returns the validation failure; the book is left unchanged.
    pub fn edit_at(&mut self, index: usize, draft: &BookDraft) -> Result<bool, BookError> {
        let Some(book) = self.books.get_mut(index) else {
            warn!(
                "event=book_edit module=library status=ignored reason=index_out_of_range index={index}"
            );
            return Ok(false);
        };

        book.apply_edit(draft)?;
        self.mark_edited(index);
        Ok(true)
    }

    /// Signals that the book at `index` was mutated in place.
    ///
    /// Persists the sequence and notifies observers without moving any
    /// book. Returns `false` for an out-of-range index.
    pub fn mark_edited(&mut self, index: usize) -> bool {
        let Some(id) = self.books.get(index).map(Book::id) else {
            return false;
        };

        debug!("event=book_edit module=library status=ok index={index} book_id={id}");
        self.persist_books();
        self.notify(LibraryChange::Edited { index, id });
        true
    }

    /// Moves to the next sort mode, re-sorts the whole sequence, and
    /// persists both the order and the mode.
    pub fn advance_sort(&mut self) -> SortMode {
        let mode = self.sort_state.mode.next();
        self.sort_state.mode = mode;
        mode.sort(&mut self.books);

        info!("event=library_sort module=library status=ok mode={mode:?}");
        self.persist_books();
        self.persist_sort_state();
        self.notify(LibraryChange::Sorted { mode });
        mode
    }

    /// Turns genre grouping on or off. Unchanged values are a no-op.
    pub fn set_group_by_genre(&mut self, group_by_genre: bool) {
        if self.sort_state.group_by_genre == group_by_genre {
            return;
        }

        self.sort_state.group_by_genre = group_by_genre;
        self.persist_sort_state();
        self.notify(LibraryChange::GroupingChanged { group_by_genre });
    }

    /// Distinct genres present in the library, alphabetical, reversed while
    /// a descending sort mode is active. Recomputed on every call.
    pub fn used_genres(&self) -> Vec<String> {
        let distinct = self
            .books
            .iter()
            .map(Book::genre)
            .collect::<BTreeSet<_>>();

        let ordered = distinct.into_iter().map(ToString::to_string);
        if self.sort_state.mode.is_descending() {
            ordered.rev().collect()
        } else {
            ordered.collect()
        }
    }

    /// One section per used genre, in `used_genres` order.
    pub fn genre_sections(&self) -> Vec<GenreSection<'_>> {
        self.used_genres()
            .into_iter()
            .map(|genre| {
                let entries = self
                    .books
                    .iter()
                    .enumerate()
                    .filter(|(_, book)| book.genre() == genre)
                    .collect();
                GenreSection { genre, entries }
            })
            .collect()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist_books(&mut self) {
        if let Err(err) = self.storage.save_books(&self.books) {
            warn!("event=library_save module=library status=error part=books error={err}");
        }
    }

    fn persist_sort_state(&mut self) {
        if let Err(err) = self.storage.save_sort_state(&self.sort_state) {
            warn!("event=library_save module=library status=error part=sort_state error={err}");
        }
    }

    fn notify(&self, change: LibraryChange) {
        for observer in &self.observers {
            observer.on_change(&change);
        }
    }
}
