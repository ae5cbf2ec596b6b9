//! BookInstance workflow controller
//!
//! The core mutation workflow of the catalog: list/detail plus the
//! create/delete/update form round trips. Mutating operations run the
//! validation pipeline first and re-render the form with the sanitized
//! input and the ordered error list when it fails; on success they persist
//! and redirect to the record's canonical URL.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Book, BookInstance, InstancePatch, InstanceStatus, NewBookInstance};
use crate::store::{CatalogStore, StoreError, StoreResult};
use crate::validation::{validate_instance_input, InstanceInput, SanitizedInstance};

use super::Response;

/// A BookInstance with its Book reference resolved for display. The store
/// does not enforce referential integrity, so the join may come up empty;
/// that renders as a missing book, not an error.
#[derive(Debug, Clone, Serialize)]
pub struct InstanceAggregate {
    pub id: Uuid,
    pub url: String,
    pub imprint: String,
    pub status: InstanceStatus,
    pub due_back: DateTime<Utc>,
    pub book: Option<Book>,
}

impl InstanceAggregate {
    fn new(instance: BookInstance, book: Option<Book>) -> Self {
        if book.is_none() {
            warn!(
                "Book instance {} references missing book {}",
                instance.id, instance.book
            );
        }
        Self {
            url: instance.url(),
            id: instance.id,
            imprint: instance.imprint,
            status: instance.status,
            due_back: instance.due_back,
            book,
        }
    }

    fn book_title(&self) -> &str {
        self.book.as_ref().map(|b| b.title.as_str()).unwrap_or("")
    }
}

async fn resolve(store: &dyn CatalogStore, id: Uuid) -> StoreResult<Option<InstanceAggregate>> {
    let Some(instance) = store.find_instance(id).await? else {
        return Ok(None);
    };
    let book = store.find_book(instance.book).await?;
    Ok(Some(InstanceAggregate::new(instance, book)))
}

/// Build the typed candidate from sanitized values. A reference value that
/// survived validation but is not a well-formed identity fails here, on the
/// persistence path.
fn candidate(values: &SanitizedInstance) -> StoreResult<NewBookInstance> {
    let book = Uuid::parse_str(&values.book).map_err(|_| StoreError::InvalidId {
        value: values.book.clone(),
    })?;
    Ok(NewBookInstance {
        book,
        imprint: values.imprint.clone(),
        status: values.status.parse().unwrap_or_default(),
        due_back: values.due_back,
    })
}

/// List all book instances with their Book reference resolved.
pub async fn list(store: &dyn CatalogStore) -> CatalogResult<Response> {
    let instances = store.list_instances().await?;
    debug!("Listing {} book instances", instances.len());
    let mut aggregates = Vec::with_capacity(instances.len());
    for instance in instances {
        let book = store.find_book(instance.book).await?;
        aggregates.push(InstanceAggregate::new(instance, book));
    }
    Ok(Response::render(
        "bookinstance_list",
        json!({
            "title": "Book Instance List",
            "bookinstance_list": aggregates,
        }),
    ))
}

/// Detail view for one instance; 404 when the identity is unknown.
pub async fn detail(store: &dyn CatalogStore, id: Uuid) -> CatalogResult<Response> {
    let Some(aggregate) = resolve(store, id).await? else {
        return Err(CatalogError::not_found("Book copy not found"));
    };
    Ok(Response::render(
        "bookinstance_detail",
        json!({
            "title": format!("Copy {}", aggregate.book_title()),
            "bookinstance": aggregate,
        }),
    ))
}

/// Empty create form with the Book selection list.
pub async fn create_get(store: &dyn CatalogStore) -> CatalogResult<Response> {
    let books = store.list_book_summaries().await?;
    Ok(Response::render(
        "bookinstance_form",
        json!({
            "title": "Create BookInstance",
            "book_list": books,
            "bookinstance": "",
        }),
    ))
}

/// Create submission. Invalid input re-renders the form with the sanitized
/// candidate and the error list: a terminal response, not a retry. Valid
/// input persists and redirects to the new record's canonical URL.
pub async fn create_post(store: &dyn CatalogStore, input: InstanceInput) -> CatalogResult<Response> {
    let outcome = validate_instance_input(&input);
    if !outcome.is_valid() {
        let books = store.list_book_summaries().await?;
        return Ok(Response::render(
            "bookinstance_form",
            json!({
                "title": "Create BookInstance",
                "book_list": books,
                "bookinstance": outcome.values,
                "errors": outcome.errors,
            }),
        ));
    }
    let saved = store.save_instance(candidate(&outcome.values)?).await?;
    Ok(Response::redirect(saved.url()))
}

/// Delete confirmation view; 404 semantics match `detail`.
pub async fn delete_get(store: &dyn CatalogStore, id: Uuid) -> CatalogResult<Response> {
    let Some(aggregate) = resolve(store, id).await? else {
        return Err(CatalogError::not_found("Book copy not found"));
    };
    Ok(Response::render(
        "bookinstance_delete",
        json!({
            "title": format!("Delete Copy {}", aggregate.book_title()),
            "bookinstance": aggregate,
        }),
    ))
}

/// Delete submission. The record is looked up by the path identity, but the
/// deletion targets the identity posted in the body: the two are not
/// checked against each other.
pub async fn delete_post(
    store: &dyn CatalogStore,
    path_id: Uuid,
    body_id: Uuid,
) -> CatalogResult<Response> {
    let _existing = store.find_instance(path_id).await?;
    store.remove_instance(body_id).await?;
    Ok(Response::redirect("/catalog/bookinstances"))
}

/// Update form, pre-populated. The target record (with its Book resolved)
/// and the full Book list are fetched concurrently; the first failure wins
/// and cancels the join.
pub async fn update_get(store: &dyn CatalogStore, id: Uuid) -> CatalogResult<Response> {
    let (aggregate, books) = tokio::try_join!(resolve(store, id), store.list_books())?;
    let Some(aggregate) = aggregate else {
        return Err(CatalogError::not_found("Book Copy not found"));
    };
    Ok(Response::render(
        "bookinstance_form",
        json!({
            "title": "Update book instance",
            "bookinstance": aggregate,
            "book_list": books,
        }),
    ))
}

/// Update submission; validation identical to create, candidate carries the
/// path identity, persistence is update-by-identity.
pub async fn update_post(
    store: &dyn CatalogStore,
    id: Uuid,
    input: InstanceInput,
) -> CatalogResult<Response> {
    let outcome = validate_instance_input(&input);
    if !outcome.is_valid() {
        let books = store.list_book_summaries().await?;
        return Ok(Response::render(
            "bookinstance_form",
            json!({
                "title": "Create BookInstance",
                "book_list": books,
                "bookinstance": outcome.values,
                "id": id,
                "errors": outcome.errors,
            }),
        ));
    }
    let c = candidate(&outcome.values)?;
    let patch = InstancePatch {
        book: c.book,
        imprint: c.imprint,
        status: c.status,
        due_back: c.due_back,
    };
    let updated = store.update_instance(id, patch).await?;
    Ok(Response::redirect(updated.url()))
}
