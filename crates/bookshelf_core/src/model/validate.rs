//! Per-field admission predicates.
//!
//! # Responsibility
//! - Answer "is this single field value acceptable?" without side effects.
//! - Serve both live per-field feedback and the atomic book constructor.
//!
//! # Invariants
//! - Text predicates judge the trimmed value, except `is_valid_genre`,
//!   which requires an exact label match.
//! - Numeric predicates receive already-parsed values; parse failures are a
//!   form-level concern.

use super::genre::GENRES;
use once_cell::sync::Lazy;
use regex::Regex;

static FOUR_DIGIT_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}$").expect("valid year regex"));

/// Lowest accepted star rating.
pub const MIN_RATING: i32 = 1;
/// Highest accepted star rating.
pub const MAX_RATING: i32 = 5;

/// Returns `true` when `value` is empty or whitespace-only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Title must contain at least one non-whitespace character.
pub fn is_valid_title(title: &str) -> bool {
    !is_blank(title)
}

/// Author first and last names follow the title rule.
pub fn is_valid_author_name(name: &str) -> bool {
    is_valid_title(name)
}

/// Year must be exactly four ASCII digits once surrounding whitespace is
/// removed. Leading zeros are allowed; signs and separators are not.
pub fn is_valid_year(year: &str) -> bool {
    FOUR_DIGIT_YEAR_RE.is_match(year.trim())
}

pub fn is_valid_pages(pages: i32) -> bool {
    pages > 0
}

/// Any finite, strictly positive number of hours. `NaN` and infinities are
/// rejected since they cannot be persisted as JSON numbers.
pub fn is_valid_reading_time(hours: f64) -> bool {
    hours.is_finite() && hours > 0.0
}

pub fn is_valid_rating(rating: i32) -> bool {
    (MIN_RATING..=MAX_RATING).contains(&rating)
}

/// Genre must be one of the known labels, byte for byte.
pub fn is_valid_genre(genre: &str) -> bool {
    GENRES.contains(&genre)
}
