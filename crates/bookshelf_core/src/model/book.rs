//! Book domain model.
//!
//! # Responsibility
//! - Define the catalog entry record and its author.
//! - Provide the only constructor and the only edit path for books.
//!
//! # Invariants
//! - `id` is a v4 UUID assigned at creation and never reused.
//! - `id` and `date_added` survive every edit unchanged.
//! - A rejected create or edit leaves no partial state behind.
//! - `notes` is `None` whenever the supplied text is absent or blank.

use super::validate::{
    is_blank, is_valid_genre, is_valid_pages, is_valid_rating, is_valid_reading_time,
    is_valid_year,
};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier of a catalog entry.
pub type BookId = Uuid;

/// Reason a create or edit attempt was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookError {
    /// Title, author first/last name or genre is blank.
    EmptyRequiredField,
    InvalidPageCount,
    InvalidReadingTime,
    InvalidRating,
    /// Year does not render as exactly four decimal digits.
    InvalidPublicationYear,
    /// Genre is not one of the known labels.
    InvalidGenre,
}

impl Display for BookError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyRequiredField => write!(f, "a required text field is empty"),
            Self::InvalidPageCount => write!(f, "number of pages must be positive"),
            Self::InvalidReadingTime => write!(f, "estimated reading time must be positive"),
            Self::InvalidRating => write!(f, "rating must be between 1 and 5"),
            Self::InvalidPublicationYear => {
                write!(f, "publication year must be a four digit year")
            }
            Self::InvalidGenre => write!(f, "genre is not one of the known genres"),
        }
    }
}

impl Error for BookError {}

/// Author of a book. Both names are stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// `First Last`, as shown on the detail screen.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Typed field values for a create or edit request.
///
/// A draft carries no identity and is not validated until it reaches
/// `Book::create` or `Book::apply_edit`.
#[derive(Debug, Clone, PartialEq)]
pub struct BookDraft {
    pub title: String,
    pub author_first_name: String,
    pub author_last_name: String,
    pub year_of_publication: i32,
    pub number_of_pages: i32,
    /// Hours.
    pub estimated_reading_time: f64,
    pub genre: String,
    pub rating: i32,
    pub notes: Option<String>,
}

/// One catalog entry.
///
/// Fields are private so that a `Book` can only come from `create`,
/// `create_at`, or deserialization of previously persisted books.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    id: BookId,
    title: String,
    author: Author,
    year_of_publication: i32,
    number_of_pages: i32,
    estimated_reading_time: f64,
    genre: String,
    rating: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    /// Unix epoch milliseconds.
    date_added: i64,
}

impl Book {
    /// Validates `draft` and creates a book stamped with the current time.
    ///
    /// # Errors
    /// - Returns the first failing rule, checked in this order: blank text
    ///   fields, page count, reading time, rating, publication year, genre.
    pub fn create(draft: &BookDraft) -> Result<Self, BookError> {
        Self::create_at(draft, now_epoch_ms())
    }

    /// Same as `create`, with an explicit `date_added` (epoch milliseconds).
    ///
    /// Used by import paths and by tests that need a deterministic
    /// insertion timeline.
    pub fn create_at(draft: &BookDraft, date_added: i64) -> Result<Self, BookError> {
        check_draft(draft)?;

        Ok(Self {
            id: Uuid::new_v4(),
            title: draft.title.trim().to_string(),
            author: Author::new(
                draft.author_first_name.trim(),
                draft.author_last_name.trim(),
            ),
            year_of_publication: draft.year_of_publication,
            number_of_pages: draft.number_of_pages,
            estimated_reading_time: draft.estimated_reading_time,
            genre: draft.genre.clone(),
            rating: draft.rating,
            notes: clean_notes(draft.notes.as_deref()),
            date_added,
        })
    }

    /// Overwrites editable fields in place after validating `draft`.
    ///
    /// # Invariants
    /// - `id` and `date_added` are preserved.
    /// - On error the book is left exactly as it was.
    pub fn apply_edit(&mut self, draft: &BookDraft) -> Result<(), BookError> {
        check_draft(draft)?;

        self.title = draft.title.trim().to_string();
        self.author = Author::new(
            draft.author_first_name.trim(),
            draft.author_last_name.trim(),
        );
        self.year_of_publication = draft.year_of_publication;
        self.number_of_pages = draft.number_of_pages;
        self.estimated_reading_time = draft.estimated_reading_time;
        self.genre = draft.genre.clone();
        self.rating = draft.rating;
        self.notes = clean_notes(draft.notes.as_deref());
        Ok(())
    }

    /// Returns a draft holding this book's current values.
    pub fn to_draft(&self) -> BookDraft {
        BookDraft {
            title: self.title.clone(),
            author_first_name: self.author.first_name.clone(),
            author_last_name: self.author.last_name.clone(),
            year_of_publication: self.year_of_publication,
            number_of_pages: self.number_of_pages,
            estimated_reading_time: self.estimated_reading_time,
            genre: self.genre.clone(),
            rating: self.rating,
            notes: self.notes.clone(),
        }
    }

    /// `Title by Last`, the one-line label used in book lists.
    pub fn list_label(&self) -> String {
        format!("{} by {}", self.title, self.author.last_name)
    }

    pub fn id(&self) -> BookId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn year_of_publication(&self) -> i32 {
        self.year_of_publication
    }

    pub fn number_of_pages(&self) -> i32 {
        self.number_of_pages
    }

    /// Hours.
    pub fn estimated_reading_time(&self) -> f64 {
        self.estimated_reading_time
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn rating(&self) -> i32 {
        self.rating
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Unix epoch milliseconds at creation.
    pub fn date_added(&self) -> i64 {
        self.date_added
    }
}

fn check_draft(draft: &BookDraft) -> Result<(), BookError> {
    if is_blank(&draft.title)
        || is_blank(&draft.author_first_name)
        || is_blank(&draft.author_last_name)
        || is_blank(&draft.genre)
    {
        return Err(BookError::EmptyRequiredField);
    }
    if !is_valid_pages(draft.number_of_pages) {
        return Err(BookError::InvalidPageCount);
    }
    if !is_valid_reading_time(draft.estimated_reading_time) {
        return Err(BookError::InvalidReadingTime);
    }
    if !is_valid_rating(draft.rating) {
        return Err(BookError::InvalidRating);
    }
    if !is_valid_year(&draft.year_of_publication.to_string()) {
        return Err(BookError::InvalidPublicationYear);
    }
    if !is_valid_genre(&draft.genre) {
        return Err(BookError::InvalidGenre);
    }
    Ok(())
}

fn clean_notes(notes: Option<&str>) -> Option<String> {
    notes
        .filter(|value| !is_blank(value))
        .map(ToString::to_string)
}

fn now_epoch_ms() -> i64 {
    // A clock set before 1970 degrades to 0 rather than failing creation.
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
}
