//! HTTP surface
//!
//! Routing, request extraction, and the mapping from workflow responses and
//! errors onto HTTP. Render instructions are encoded as a JSON body carrying
//! the template name and the data bag; the view layer downstream of this
//! service treats that as its input. NotFound errors become 404s with their
//! message, store failures become plain 500s.

use std::sync::Arc;

use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Redirect},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;
use uuid::Uuid;

use crate::controllers::{self, Response};
use crate::error::CatalogError;
use crate::store::CatalogStore;
use crate::validation::InstanceInput;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
}

impl IntoResponse for Response {
    fn into_response(self) -> axum::response::Response {
        match self {
            Response::Render { template, bag } => Json(json!({
                "template": template,
                "data": bag,
            }))
            .into_response(),
            Response::Redirect { location } => Redirect::to(&location).into_response(),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> axum::response::Response {
        match self {
            CatalogError::NotFound { message } => {
                (StatusCode::NOT_FOUND, message).into_response()
            }
            CatalogError::Store(err) => {
                warn!("Store failure: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        // book instances
        .route("/catalog/bookinstances", get(bookinstance_list))
        .route(
            "/catalog/bookinstance/create",
            get(bookinstance_create_get).post(bookinstance_create_post),
        )
        .route("/catalog/bookinstance/:id", get(bookinstance_detail))
        .route(
            "/catalog/bookinstance/:id/delete",
            get(bookinstance_delete_get).post(bookinstance_delete_post),
        )
        .route(
            "/catalog/bookinstance/:id/update",
            get(bookinstance_update_get).post(bookinstance_update_post),
        )
        // authors
        .route("/catalog/authors", get(author_list))
        .route("/catalog/author/:id", get(author_detail))
        // books (stubbed)
        .route("/catalog/books", get(book_list))
        .route(
            "/catalog/book/create",
            get(book_create_get).post(book_create_post),
        )
        .route("/catalog/book/:id", get(book_detail))
        .route(
            "/catalog/book/:id/delete",
            get(book_delete_get).post(book_delete_post),
        )
        .route(
            "/catalog/book/:id/update",
            get(book_update_get).post(book_update_post),
        )
        // middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "success": true, "data": "OK" }))
}

async fn index() -> String {
    controllers::book::index()
}

// --- book instance handlers ---

async fn bookinstance_list(State(state): State<AppState>) -> Result<Response, CatalogError> {
    controllers::book_instance::list(state.store.as_ref()).await
}

async fn bookinstance_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, CatalogError> {
    controllers::book_instance::detail(state.store.as_ref(), id).await
}

async fn bookinstance_create_get(
    State(state): State<AppState>,
) -> Result<Response, CatalogError> {
    controllers::book_instance::create_get(state.store.as_ref()).await
}

async fn bookinstance_create_post(
    State(state): State<AppState>,
    Form(input): Form<InstanceInput>,
) -> Result<Response, CatalogError> {
    controllers::book_instance::create_post(state.store.as_ref(), input).await
}

async fn bookinstance_delete_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, CatalogError> {
    controllers::book_instance::delete_get(state.store.as_ref(), id).await
}

/// Body of a delete submission. The posted identity is the one removed.
#[derive(Debug, Deserialize)]
struct DeleteInstanceForm {
    bookinstanceid: String,
}

async fn bookinstance_delete_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<DeleteInstanceForm>,
) -> axum::response::Response {
    let Ok(body_id) = Uuid::parse_str(&form.bookinstanceid) else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    match controllers::book_instance::delete_post(state.store.as_ref(), id, body_id).await {
        Ok(response) => response.into_response(),
        Err(err) => err.into_response(),
    }
}

async fn bookinstance_update_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, CatalogError> {
    controllers::book_instance::update_get(state.store.as_ref(), id).await
}

async fn bookinstance_update_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(input): Form<InstanceInput>,
) -> Result<Response, CatalogError> {
    controllers::book_instance::update_post(state.store.as_ref(), id, input).await
}

// --- author handlers ---

async fn author_list(State(state): State<AppState>) -> Result<Response, CatalogError> {
    controllers::author::list(state.store.as_ref()).await
}

async fn author_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, CatalogError> {
    controllers::author::detail(state.store.as_ref(), id).await
}

// --- book stub handlers ---

async fn book_list() -> String {
    controllers::book::list()
}

async fn book_detail(Path(id): Path<Uuid>) -> String {
    controllers::book::detail(id)
}

async fn book_create_get() -> String {
    controllers::book::create_get()
}

async fn book_create_post() -> String {
    controllers::book::create_post()
}

async fn book_delete_get(Path(_id): Path<Uuid>) -> String {
    controllers::book::delete_get()
}

async fn book_delete_post(Path(_id): Path<Uuid>) -> String {
    controllers::book::delete_post()
}

async fn book_update_get(Path(_id): Path<Uuid>) -> String {
    controllers::book::update_get()
}

async fn book_update_post(Path(_id): Path<Uuid>) -> String {
    controllers::book::update_post()
}
