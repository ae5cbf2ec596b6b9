//! Error handling for the catalog service
//!
//! This module provides idiomatic Rust error types using thiserror. Two
//! error kinds are terminal for a request and cross the HTTP boundary:
//! a missing entity (404 with a human-readable message) and any store
//! failure (500-class). Validation problems are not errors at this level;
//! the validation pipeline returns them as data (see [`crate::validation`]).

use thiserror::Error;

use crate::store::StoreError;

/// Main error type for catalog workflows
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Entity absent for the given identity. Carries the message the outer
    /// boundary reports with the 404.
    #[error("{message}")]
    NotFound { message: String },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl CatalogError {
    pub fn not_found(message: impl Into<String>) -> Self {
        CatalogError::NotFound {
            message: message.into(),
        }
    }

    /// HTTP status the outer boundary should report for this error.
    pub fn status(&self) -> u16 {
        match self {
            CatalogError::NotFound { .. } => 404,
            CatalogError::Store(_) => 500,
        }
    }
}

/// Result type alias for convenience
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status_and_message() {
        let err = CatalogError::not_found("Book copy not found");
        assert_eq!(err.status(), 404);
        assert_eq!(err.to_string(), "Book copy not found");
    }

    #[test]
    fn test_store_error_is_500() {
        let err = CatalogError::from(StoreError::Unavailable {
            message: "connection refused".to_string(),
        });
        assert_eq!(err.status(), 500);
    }
}
