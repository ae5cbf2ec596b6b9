//! In-memory store backend
//!
//! Backs the integration tests and the default server configuration. All
//! three collections live in hash maps behind a single async RwLock, which
//! gives the per-document consistency the workflows assume.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::models::{
    Author, Book, BookInstance, BookSummary, InstancePatch, NewAuthor, NewBook, NewBookInstance,
};

use super::{check_name_component, CatalogStore, StoreError, StoreResult};

#[derive(Default)]
struct Collections {
    books: HashMap<Uuid, Book>,
    authors: HashMap<Uuid, Author>,
    instances: HashMap<Uuid, BookInstance>,
}

/// In-memory catalog store
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list_books(&self) -> StoreResult<Vec<Book>> {
        let data = self.data.read().await;
        let mut books: Vec<Book> = data.books.values().cloned().collect();
        books.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(books)
    }

    async fn list_book_summaries(&self) -> StoreResult<Vec<BookSummary>> {
        let books = self.list_books().await?;
        Ok(books
            .into_iter()
            .map(|b| BookSummary {
                id: b.id,
                title: b.title,
            })
            .collect())
    }

    async fn find_book(&self, id: Uuid) -> StoreResult<Option<Book>> {
        let data = self.data.read().await;
        Ok(data.books.get(&id).cloned())
    }

    async fn save_book(&self, book: NewBook) -> StoreResult<Book> {
        let record = Book {
            id: Uuid::new_v4(),
            title: book.title,
            author: book.author,
            summary: book.summary,
            isbn: book.isbn,
            genre: book.genre,
        };
        let mut data = self.data.write().await;
        data.books.insert(record.id, record.clone());
        info!("Created book: {} ({})", record.title, record.id);
        Ok(record)
    }

    async fn list_authors(&self) -> StoreResult<Vec<Author>> {
        let data = self.data.read().await;
        let mut authors: Vec<Author> = data.authors.values().cloned().collect();
        authors.sort_by(|a, b| a.family_name.cmp(&b.family_name));
        Ok(authors)
    }

    async fn find_author(&self, id: Uuid) -> StoreResult<Option<Author>> {
        let data = self.data.read().await;
        Ok(data.authors.get(&id).cloned())
    }

    async fn save_author(&self, author: NewAuthor) -> StoreResult<Author> {
        check_name_component("first_name", &author.first_name)?;
        check_name_component("family_name", &author.family_name)?;
        let record = Author {
            id: Uuid::new_v4(),
            first_name: author.first_name,
            family_name: author.family_name,
            date_of_birth: author.date_of_birth,
            date_of_death: author.date_of_death,
        };
        let mut data = self.data.write().await;
        data.authors.insert(record.id, record.clone());
        info!("Created author: {} ({})", record.name(), record.id);
        Ok(record)
    }

    async fn list_instances(&self) -> StoreResult<Vec<BookInstance>> {
        let data = self.data.read().await;
        let mut instances: Vec<BookInstance> = data.instances.values().cloned().collect();
        instances.sort_by(|a, b| a.imprint.cmp(&b.imprint));
        Ok(instances)
    }

    async fn find_instance(&self, id: Uuid) -> StoreResult<Option<BookInstance>> {
        let data = self.data.read().await;
        Ok(data.instances.get(&id).cloned())
    }

    async fn save_instance(&self, instance: NewBookInstance) -> StoreResult<BookInstance> {
        let record = BookInstance {
            id: Uuid::new_v4(),
            book: instance.book,
            imprint: instance.imprint,
            status: instance.status,
            // storage default: unset due-back becomes "now"
            due_back: instance.due_back.unwrap_or_else(Utc::now),
        };
        let mut data = self.data.write().await;
        data.instances.insert(record.id, record.clone());
        info!("Created book instance: {} ({})", record.imprint, record.id);
        Ok(record)
    }

    async fn update_instance(&self, id: Uuid, patch: InstancePatch) -> StoreResult<BookInstance> {
        let mut data = self.data.write().await;
        let record = data
            .instances
            .get_mut(&id)
            .ok_or(StoreError::MissingDocument { id })?;
        record.book = patch.book;
        record.imprint = patch.imprint;
        record.status = patch.status;
        record.due_back = patch.due_back.unwrap_or_else(Utc::now);
        let updated = record.clone();
        info!("Updated book instance: {} ({})", updated.imprint, updated.id);
        Ok(updated)
    }

    async fn remove_instance(&self, id: Uuid) -> StoreResult<()> {
        let mut data = self.data.write().await;
        if data.instances.remove(&id).is_some() {
            info!("Removed book instance: {}", id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InstanceStatus, NAME_MAX_LEN};

    fn new_instance(book: Uuid) -> NewBookInstance {
        NewBookInstance {
            book,
            imprint: "Penguin Classics".to_string(),
            status: InstanceStatus::Available,
            due_back: None,
        }
    }

    #[tokio::test]
    async fn test_save_assigns_identity_and_due_back_default() {
        let store = MemoryStore::new();
        let before = Utc::now();
        let saved = store.save_instance(new_instance(Uuid::new_v4())).await.unwrap();
        assert!(saved.due_back >= before);
        let found = store.find_instance(saved.id).await.unwrap().unwrap();
        assert_eq!(found.imprint, "Penguin Classics");
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_missing_document() {
        let store = MemoryStore::new();
        let patch = InstancePatch {
            book: Uuid::new_v4(),
            imprint: "X".to_string(),
            status: InstanceStatus::Loaned,
            due_back: None,
        };
        let err = store.update_instance(Uuid::new_v4(), patch).await.unwrap_err();
        assert!(matches!(err, StoreError::MissingDocument { .. }));
    }

    #[tokio::test]
    async fn test_remove_unknown_id_is_noop() {
        let store = MemoryStore::new();
        assert!(store.remove_instance(Uuid::new_v4()).await.is_ok());
    }

    #[tokio::test]
    async fn test_author_constraints_enforced_at_save() {
        let store = MemoryStore::new();
        let err = store
            .save_author(NewAuthor {
                first_name: String::new(),
                family_name: "Austen".to_string(),
                date_of_birth: None,
                date_of_death: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Rejected { .. }));

        let err = store
            .save_author(NewAuthor {
                first_name: "a".repeat(NAME_MAX_LEN + 1),
                family_name: "Austen".to_string(),
                date_of_birth: None,
                date_of_death: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Rejected { .. }));
    }

    #[tokio::test]
    async fn test_book_summaries_are_title_only_projection() {
        let store = MemoryStore::new();
        let book = store
            .save_book(NewBook {
                title: "Emma".to_string(),
                author: Uuid::new_v4(),
                summary: "A novel".to_string(),
                isbn: "9780141439587".to_string(),
                genre: vec![],
            })
            .await
            .unwrap();
        let summaries = store.list_book_summaries().await.unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, book.id);
        assert_eq!(summaries[0].title, "Emma");
    }
}
