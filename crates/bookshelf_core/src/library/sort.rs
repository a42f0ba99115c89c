//! Sort-mode state machine.
//!
//! # Invariants
//! - The cycle is `TitleAsc -> TitleDesc -> DateAddedAsc -> DateAddedDesc`
//!   and back to `TitleAsc`.
//! - Genre list direction follows `SortMode::is_descending`.

use crate::model::book::Book;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// Active ordering of the book sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortMode {
    DateAddedAsc,
    DateAddedDesc,
    #[default]
    TitleAsc,
    TitleDesc,
}

impl SortMode {
    /// Next state of the cycle.
    pub fn next(self) -> Self {
        match self {
            Self::TitleAsc => Self::TitleDesc,
            Self::TitleDesc => Self::DateAddedAsc,
            Self::DateAddedAsc => Self::DateAddedDesc,
            Self::DateAddedDesc => Self::TitleAsc,
        }
    }

    pub fn is_descending(self) -> bool {
        matches!(self, Self::TitleDesc | Self::DateAddedDesc)
    }

    /// Compares two books under this mode. Titles compare case-sensitively.
    pub fn compare(self, left: &Book, right: &Book) -> Ordering {
        match self {
            Self::TitleAsc => left.title().cmp(right.title()),
            Self::TitleDesc => right.title().cmp(left.title()),
            Self::DateAddedAsc => left.date_added().cmp(&right.date_added()),
            Self::DateAddedDesc => right.date_added().cmp(&left.date_added()),
        }
    }

    /// Stable in-place sort of `books` under this mode.
    pub fn sort(self, books: &mut [Book]) {
        books.sort_by(|left, right| self.compare(left, right));
    }
}

impl Display for SortMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::DateAddedAsc => "date added (oldest first)",
            Self::DateAddedDesc => "date added (newest first)",
            Self::TitleAsc => "title (A-Z)",
            Self::TitleDesc => "title (Z-A)",
        };
        f.write_str(label)
    }
}

/// Persisted view preferences: sort mode plus the genre-grouping flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortState {
    pub mode: SortMode,
    #[serde(default = "default_group_by_genre")]
    pub group_by_genre: bool,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            mode: SortMode::default(),
            group_by_genre: default_group_by_genre(),
        }
    }
}

fn default_group_by_genre() -> bool {
    true
}
