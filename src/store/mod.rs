//! Document store contract for the catalog collections
//!
//! The workflows above this module only ever talk to [`CatalogStore`]; which
//! backend sits behind it is a deployment choice. The in-memory backend is
//! always compiled and backs the tests; the Postgres backend is gated behind
//! the `database` feature.
//!
//! The store does not enforce referential integrity: a BookInstance may
//! carry a `book` identity with no matching Book document. Such a dangling
//! reference surfaces at render time as a missing join, not as a store
//! failure.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    Author, Book, BookInstance, BookSummary, InstancePatch, NewAuthor, NewBook, NewBookInstance,
};

pub mod memory;
#[cfg(feature = "database")]
pub mod postgres;

pub use memory::MemoryStore;
#[cfg(feature = "database")]
pub use postgres::PgCatalogStore;

/// Persistence/read failures. Always propagated to the caller, never
/// silently swallowed or retried.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store unavailable: {message}")]
    Unavailable { message: String },

    #[error("No document with id {id}")]
    MissingDocument { id: Uuid },

    #[error("Not a valid document id: '{value}'")]
    InvalidId { value: String },

    #[error("Document rejected: {message}")]
    Rejected { message: String },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Author name components are required and capped at
/// [`crate::models::NAME_MAX_LEN`]; both backends enforce this at save.
pub(crate) fn check_name_component(field: &str, value: &str) -> StoreResult<()> {
    if value.is_empty() {
        return Err(StoreError::Rejected {
            message: format!("{} is required", field),
        });
    }
    if value.len() > crate::models::NAME_MAX_LEN {
        return Err(StoreError::Rejected {
            message: format!("{} exceeds {} characters", field, crate::models::NAME_MAX_LEN),
        });
    }
    Ok(())
}

/// Asynchronous CRUD contract over the three catalog collections.
///
/// `save_*` operations assign a fresh identity and return the stored record;
/// identities are immutable once assigned. `update_instance` is
/// update-by-identity and fails with [`StoreError::MissingDocument`] for an
/// unknown id, while `remove_instance` is unconditional: removing an
/// unknown id is a no-op.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    // Books
    async fn list_books(&self) -> StoreResult<Vec<Book>>;

    /// Title-only projection, for selection lists.
    async fn list_book_summaries(&self) -> StoreResult<Vec<BookSummary>>;

    async fn find_book(&self, id: Uuid) -> StoreResult<Option<Book>>;

    async fn save_book(&self, book: NewBook) -> StoreResult<Book>;

    // Authors
    async fn list_authors(&self) -> StoreResult<Vec<Author>>;

    async fn find_author(&self, id: Uuid) -> StoreResult<Option<Author>>;

    async fn save_author(&self, author: NewAuthor) -> StoreResult<Author>;

    // Book instances
    async fn list_instances(&self) -> StoreResult<Vec<BookInstance>>;

    async fn find_instance(&self, id: Uuid) -> StoreResult<Option<BookInstance>>;

    async fn save_instance(&self, instance: NewBookInstance) -> StoreResult<BookInstance>;

    async fn update_instance(&self, id: Uuid, patch: InstancePatch) -> StoreResult<BookInstance>;

    async fn remove_instance(&self, id: Uuid) -> StoreResult<()>;
}
