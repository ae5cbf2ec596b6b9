//! Author read path
//!
//! List and detail views for authors. The display name, canonical URL, and
//! the four date presentation fields are computed per render.

use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::Author;
use crate::store::CatalogStore;

use super::Response;

/// Author record plus its computed display fields, as a view bag.
fn author_bag(author: &Author) -> Value {
    json!({
        "id": author.id,
        "first_name": author.first_name,
        "family_name": author.family_name,
        "date_of_birth": author.date_of_birth,
        "date_of_death": author.date_of_death,
        "name": author.name(),
        "url": author.url(),
        "date_of_birth_formatted": author.date_of_birth_formatted(),
        "date_of_death_formatted": author.date_of_death_formatted(),
        "date_of_birth_input": author.date_of_birth_input(),
        "date_of_death_input": author.date_of_death_input(),
    })
}

pub async fn list(store: &dyn CatalogStore) -> CatalogResult<Response> {
    let authors = store.list_authors().await?;
    let bags: Vec<Value> = authors.iter().map(author_bag).collect();
    Ok(Response::render(
        "author_list",
        json!({
            "title": "Author List",
            "author_list": bags,
        }),
    ))
}

pub async fn detail(store: &dyn CatalogStore, id: Uuid) -> CatalogResult<Response> {
    let Some(author) = store.find_author(id).await? else {
        return Err(CatalogError::not_found("Author not found"));
    };
    Ok(Response::render(
        "author_detail",
        json!({
            "title": "Author Detail",
            "author": author_bag(&author),
        }),
    ))
}
