//! Postgres store backend
//!
//! Available behind the `database` feature. Status values are stored as
//! text and mapped back onto the enum on read; an unrecognized stored value
//! falls back to the default status rather than poisoning the row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::models::{
    Author, Book, BookInstance, BookSummary, InstancePatch, NewAuthor, NewBook, NewBookInstance,
};

use super::{check_name_component, CatalogStore, StoreError, StoreResult};

/// Postgres-backed catalog store
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_err(err: sqlx::Error) -> StoreError {
    StoreError::Unavailable {
        message: err.to_string(),
    }
}

#[derive(FromRow)]
struct InstanceRow {
    id: Uuid,
    book: Uuid,
    imprint: String,
    status: String,
    due_back: DateTime<Utc>,
}

impl From<InstanceRow> for BookInstance {
    fn from(row: InstanceRow) -> Self {
        BookInstance {
            id: row.id,
            book: row.book,
            imprint: row.imprint,
            status: row.status.parse().unwrap_or_default(),
            due_back: row.due_back,
        }
    }
}

#[derive(FromRow)]
struct BookRow {
    id: Uuid,
    title: String,
    author: Uuid,
    summary: String,
    isbn: String,
    genre: Vec<Uuid>,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book {
            id: row.id,
            title: row.title,
            author: row.author,
            summary: row.summary,
            isbn: row.isbn,
            genre: row.genre,
        }
    }
}

#[derive(FromRow)]
struct AuthorRow {
    id: Uuid,
    first_name: String,
    family_name: String,
    date_of_birth: Option<DateTime<Utc>>,
    date_of_death: Option<DateTime<Utc>>,
}

impl From<AuthorRow> for Author {
    fn from(row: AuthorRow) -> Self {
        Author {
            id: row.id,
            first_name: row.first_name,
            family_name: row.family_name,
            date_of_birth: row.date_of_birth,
            date_of_death: row.date_of_death,
        }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn list_books(&self) -> StoreResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, title, author, summary, isbn, genre
            FROM books
            ORDER BY title
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn list_book_summaries(&self) -> StoreResult<Vec<BookSummary>> {
        let rows: Vec<(Uuid, String)> = sqlx::query_as(
            r#"
            SELECT id, title
            FROM books
            ORDER BY title
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|(id, title)| BookSummary { id, title })
            .collect())
    }

    async fn find_book(&self, id: Uuid) -> StoreResult<Option<Book>> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, title, author, summary, isbn, genre
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(Book::from))
    }

    async fn save_book(&self, book: NewBook) -> StoreResult<Book> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            INSERT INTO books (id, title, author, summary, isbn, genre)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, author, summary, isbn, genre
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(book.title)
        .bind(book.author)
        .bind(book.summary)
        .bind(book.isbn)
        .bind(book.genre)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        let book = Book::from(row);
        info!("Created book: {} ({})", book.title, book.id);
        Ok(book)
    }

    async fn list_authors(&self) -> StoreResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT id, first_name, family_name, date_of_birth, date_of_death
            FROM authors
            ORDER BY family_name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows.into_iter().map(Author::from).collect())
    }

    async fn find_author(&self, id: Uuid) -> StoreResult<Option<Author>> {
        let row = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT id, first_name, family_name, date_of_birth, date_of_death
            FROM authors
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(Author::from))
    }

    async fn save_author(&self, author: NewAuthor) -> StoreResult<Author> {
        check_name_component("first_name", &author.first_name)?;
        check_name_component("family_name", &author.family_name)?;
        let row = sqlx::query_as::<_, AuthorRow>(
            r#"
            INSERT INTO authors (id, first_name, family_name, date_of_birth, date_of_death)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, first_name, family_name, date_of_birth, date_of_death
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(author.first_name)
        .bind(author.family_name)
        .bind(author.date_of_birth)
        .bind(author.date_of_death)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        let author = Author::from(row);
        info!("Created author: {} ({})", author.name(), author.id);
        Ok(author)
    }

    async fn list_instances(&self) -> StoreResult<Vec<BookInstance>> {
        let rows = sqlx::query_as::<_, InstanceRow>(
            r#"
            SELECT id, book, imprint, status, due_back
            FROM book_instances
            ORDER BY imprint
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows.into_iter().map(BookInstance::from).collect())
    }

    async fn find_instance(&self, id: Uuid) -> StoreResult<Option<BookInstance>> {
        let row = sqlx::query_as::<_, InstanceRow>(
            r#"
            SELECT id, book, imprint, status, due_back
            FROM book_instances
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(BookInstance::from))
    }

    async fn save_instance(&self, instance: NewBookInstance) -> StoreResult<BookInstance> {
        let row = sqlx::query_as::<_, InstanceRow>(
            r#"
            INSERT INTO book_instances (id, book, imprint, status, due_back)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, book, imprint, status, due_back
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(instance.book)
        .bind(instance.imprint)
        .bind(instance.status.to_string())
        .bind(instance.due_back.unwrap_or_else(Utc::now))
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        let instance = BookInstance::from(row);
        info!("Created book instance: {} ({})", instance.imprint, instance.id);
        Ok(instance)
    }

    async fn update_instance(&self, id: Uuid, patch: InstancePatch) -> StoreResult<BookInstance> {
        let row = sqlx::query_as::<_, InstanceRow>(
            r#"
            UPDATE book_instances
            SET book = $2, imprint = $3, status = $4, due_back = $5
            WHERE id = $1
            RETURNING id, book, imprint, status, due_back
            "#,
        )
        .bind(id)
        .bind(patch.book)
        .bind(patch.imprint)
        .bind(patch.status.to_string())
        .bind(patch.due_back.unwrap_or_else(Utc::now))
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        let row = row.ok_or(StoreError::MissingDocument { id })?;
        let instance = BookInstance::from(row);
        info!("Updated book instance: {} ({})", instance.imprint, instance.id);
        Ok(instance)
    }

    async fn remove_instance(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM book_instances
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        if result.rows_affected() > 0 {
            info!("Removed book instance: {}", id);
        }
        Ok(())
    }
}
