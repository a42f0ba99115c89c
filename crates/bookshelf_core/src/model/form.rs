//! Raw-text book form.
//!
//! # Responsibility
//! - Hold user-typed text for every book field.
//! - Turn that text into a typed `BookDraft`, reporting the first bad field
//!   with a message that can be shown as-is.
//!
//! # Invariants
//! - Field checks run in screen order: title, year, author, pages, reading
//!   time, rating, genre.
//! - Numeric text is trimmed before parsing.

use super::book::{Book, BookDraft, BookError};
use super::genre::default_genre;
use super::validate::{
    is_blank, is_valid_author_name, is_valid_genre, is_valid_pages, is_valid_rating,
    is_valid_reading_time, is_valid_title, is_valid_year,
};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// First problem found while turning a form into a draft or a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    InvalidTitle,
    InvalidYear,
    InvalidAuthorName,
    PagesNotInteger,
    PagesNotPositive,
    ReadingTimeNotNumber,
    ReadingTimeNotPositive,
    InvalidRating,
    InvalidGenre,
    /// Entity-level rejection surfaced after form checks passed.
    Book(BookError),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            Self::InvalidTitle => {
                "Please enter a valid title. The title must be at least one non-whitespace character."
            }
            Self::InvalidYear => "Please enter a valid publication year.",
            Self::InvalidAuthorName => "Please enter a valid author name.",
            Self::PagesNotInteger => {
                "Please enter a valid number of pages. The number must be an integer."
            }
            Self::PagesNotPositive => {
                "Please enter a valid number of pages. The number must be positive."
            }
            Self::ReadingTimeNotNumber => {
                "Please enter a valid reading time. The time must be a decimal number or integer."
            }
            Self::ReadingTimeNotPositive => {
                "Please enter a valid reading time. The time must be positive."
            }
            Self::InvalidRating => "Please choose a rating from 1 to 5.",
            Self::InvalidGenre => "Please choose one of the listed genres.",
            Self::Book(_) => "Invalid data entered",
        };
        f.write_str(message)
    }
}

impl Error for FormError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Book(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BookError> for FormError {
    fn from(value: BookError) -> Self {
        Self::Book(value)
    }
}

/// User-entered text for one book, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookForm {
    pub title: String,
    pub year_of_publication: String,
    pub author_first_name: String,
    pub author_last_name: String,
    pub number_of_pages: String,
    pub estimated_reading_time: String,
    pub genre: String,
    pub rating: String,
    pub notes: String,
}

impl Default for BookForm {
    /// Empty text fields, the first genre and a one-star rating.
    fn default() -> Self {
        Self {
            title: String::new(),
            year_of_publication: String::new(),
            author_first_name: String::new(),
            author_last_name: String::new(),
            number_of_pages: String::new(),
            estimated_reading_time: String::new(),
            genre: default_genre().to_string(),
            rating: "1".to_string(),
            notes: String::new(),
        }
    }
}

impl BookForm {
    /// Pre-fills a form with an existing book, for the edit flow.
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title().to_string(),
            year_of_publication: book.year_of_publication().to_string(),
            author_first_name: book.author().first_name.clone(),
            author_last_name: book.author().last_name.clone(),
            number_of_pages: book.number_of_pages().to_string(),
            estimated_reading_time: book.estimated_reading_time().to_string(),
            genre: book.genre().to_string(),
            rating: book.rating().to_string(),
            notes: book.notes().unwrap_or_default().to_string(),
        }
    }

    /// Parses every field and returns a typed draft.
    ///
    /// # Errors
    /// - Returns the first failing field in screen order.
    pub fn parse(&self) -> Result<BookDraft, FormError> {
        if !is_valid_title(&self.title) {
            return Err(FormError::InvalidTitle);
        }

        let year_text = self.year_of_publication.trim();
        if !is_valid_year(year_text) {
            return Err(FormError::InvalidYear);
        }
        let year_of_publication = year_text
            .parse::<i32>()
            .map_err(|_| FormError::InvalidYear)?;

        if !is_valid_author_name(&self.author_first_name)
            || !is_valid_author_name(&self.author_last_name)
        {
            return Err(FormError::InvalidAuthorName);
        }

        let number_of_pages = self
            .number_of_pages
            .trim()
            .parse::<i32>()
            .map_err(|_| FormError::PagesNotInteger)?;
        if !is_valid_pages(number_of_pages) {
            return Err(FormError::PagesNotPositive);
        }

        let estimated_reading_time = self
            .estimated_reading_time
            .trim()
            .parse::<f64>()
            .map_err(|_| FormError::ReadingTimeNotNumber)?;
        if !estimated_reading_time.is_finite() {
            return Err(FormError::ReadingTimeNotNumber);
        }
        if !is_valid_reading_time(estimated_reading_time) {
            return Err(FormError::ReadingTimeNotPositive);
        }

        let rating = self
            .rating
            .trim()
            .parse::<i32>()
            .map_err(|_| FormError::InvalidRating)?;
        if !is_valid_rating(rating) {
            return Err(FormError::InvalidRating);
        }

        if !is_valid_genre(&self.genre) {
            return Err(FormError::InvalidGenre);
        }

        let notes = if is_blank(&self.notes) {
            None
        } else {
            Some(self.notes.clone())
        };

        Ok(BookDraft {
            title: self.title.clone(),
            author_first_name: self.author_first_name.clone(),
            author_last_name: self.author_last_name.clone(),
            year_of_publication,
            number_of_pages,
            estimated_reading_time,
            genre: self.genre.clone(),
            rating,
            notes,
        })
    }

    /// Parses the form and builds a new book from it.
    pub fn submit(&self) -> Result<Book, FormError> {
        let draft = self.parse()?;
        Ok(Book::create(&draft)?)
    }
}
