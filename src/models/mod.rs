//! Models module for the library catalog
//!
//! This module contains the data structures representing books, authors,
//! and book instances, their field constraints, and the computed display
//! fields derived from them on read.

pub mod catalog_models;

// Re-export commonly used types for convenience
pub use catalog_models::{
    Author, Book, BookInstance, BookSummary, InstancePatch, InstanceStatus, NewAuthor, NewBook,
    NewBookInstance, NAME_MAX_LEN,
};
