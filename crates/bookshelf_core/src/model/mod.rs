//! Book catalog domain model.
//!
//! # Responsibility
//! - Define the canonical `Book` record and its nested `Author`.
//! - Own the admission rules that decide whether field values form a book.
//! - Parse raw form text into typed drafts for the presentation layer.
//!
//! # Invariants
//! - Every `Book` is identified by a stable `BookId` assigned at creation.
//! - Validation runs only at the create/edit boundary; stored books are
//!   never re-checked.
//! - The predicates in `validate` are the single source of truth for both
//!   live field feedback and atomic construction.

pub mod book;
pub mod form;
pub mod genre;
pub mod validate;
