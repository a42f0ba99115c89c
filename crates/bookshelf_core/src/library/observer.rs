//! Change notifications emitted by `Library`.

use super::sort::SortMode;
use crate::model::book::BookId;

/// What changed in the library. Indexes refer to the sequence after the
/// change, except `Removed`, which carries the index the book had.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryChange {
    Added { index: usize, id: BookId },
    Removed { index: usize, id: BookId },
    /// A stored book was mutated in place; order is unchanged.
    Edited { index: usize, id: BookId },
    Sorted { mode: SortMode },
    GroupingChanged { group_by_genre: bool },
}

/// Receives library change notifications, in registration order.
pub trait LibraryObserver {
    fn on_change(&self, change: &LibraryChange);
}

impl<F> LibraryObserver for F
where
    F: Fn(&LibraryChange),
{
    fn on_change(&self, change: &LibraryChange) {
        self(change);
    }
}
