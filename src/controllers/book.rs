//! Book workflow controller: unimplemented stubs
//!
//! The Book mutation workflow has not been built out yet; every handler
//! answers with an explicit placeholder body so the routes stay wired.

use uuid::Uuid;

pub fn index() -> String {
    "NOT IMPLEMENTED: Site Home Page".to_string()
}

pub fn list() -> String {
    "NOT IMPLEMENTED: Book list".to_string()
}

pub fn detail(id: Uuid) -> String {
    format!("NOT IMPLEMENTED: Book detail: {}", id)
}

pub fn create_get() -> String {
    "NOT IMPLEMENTED: Book create GET".to_string()
}

pub fn create_post() -> String {
    "NOT IMPLEMENTED: Book create POST".to_string()
}

pub fn delete_get() -> String {
    "NOT IMPLEMENTED: Book delete GET".to_string()
}

pub fn delete_post() -> String {
    "NOT IMPLEMENTED: Book delete POST".to_string()
}

pub fn update_get() -> String {
    "NOT IMPLEMENTED: Book update GET".to_string()
}

pub fn update_post() -> String {
    "NOT IMPLEMENTED: Book update POST".to_string()
}
