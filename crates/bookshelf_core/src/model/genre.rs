//! Closed genre vocabulary.

/// Every genre label a book may carry, in display order.
///
/// Membership checks are exact: labels are neither trimmed nor case-folded.
pub const GENRES: [&str; 24] = [
    "Academic",
    "Action and Adventure",
    "Biography",
    "Classic",
    "Comic Book and Graphic Novel",
    "Dystopian",
    "Fantasy",
    "Fiction",
    "Historical Fiction",
    "History",
    "Horror",
    "Humanities & Social Sciences",
    "Memoir and Autobiography",
    "Mystery",
    "Poetry",
    "Religion and Spirituality",
    "Romance",
    "Science Fiction",
    "Science and Technology",
    "Short Stories",
    "Suspense and Thriller",
    "Thriller and Suspense",
    "True Crime",
    "Young Adult",
];

/// Returns the known genre labels.
pub fn genres() -> &'static [&'static str] {
    &GENRES
}

/// Returns the first genre label, used as the form default.
pub fn default_genre() -> &'static str {
    GENRES[0]
}
