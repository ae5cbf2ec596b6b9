//! library-catalog - Library catalog management service
//!
//! This crate implements the catalog workflows for a small lending library:
//! books, authors, and the physical book copies (instances) that get loaned
//! out. The non-trivial path is the BookInstance lifecycle: form validation
//! with preserved input on re-render, referential lookups against the Book
//! collection, and a concurrent fetch-join for the update form.
//!
//! ## Architecture
//! Requests flow handler -> workflow controller -> store:
//! Router -> controllers::* -> CatalogStore -> (render bag | redirect)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use library_catalog::routes::{create_router, AppState};
//! use library_catalog::store::MemoryStore;
//!
//! let state = AppState { store: Arc::new(MemoryStore::new()) };
//! let app = create_router(state);
//! # let _ = app;
//! ```

// Core error handling
pub mod error;

// Entity records and computed fields
pub mod models;

// Document store contract and backends
pub mod store;

// Form input validation pipeline
pub mod validation;

// Workflow controllers for each collection
pub mod controllers;

// HTTP surface: router, extractors, response mapping
pub mod routes;

pub use error::{CatalogError, CatalogResult};
pub use store::{CatalogStore, MemoryStore, StoreError};
