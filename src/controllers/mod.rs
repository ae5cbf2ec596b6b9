//! Workflow controllers
//!
//! One submodule per collection. Every operation is a pure async function of
//! (store, request data) returning either a render instruction (a template
//! name plus the data bag the view boundary consumes) or a redirect
//! instruction. Controllers hold no state of their own; everything lives in
//! the store.

use serde_json::Value;

pub mod author;
pub mod book;
pub mod book_instance;

/// Instruction handed to the outer boundary after a workflow operation.
#[derive(Debug, Clone)]
pub enum Response {
    /// Render `template` with `bag`; the view layer is a pure function from
    /// the bag to output bytes.
    Render { template: &'static str, bag: Value },
    /// Redirect to `location` (a canonical URL or a list path).
    Redirect { location: String },
}

impl Response {
    pub fn render(template: &'static str, bag: Value) -> Self {
        Response::Render { template, bag }
    }

    pub fn redirect(location: impl Into<String>) -> Self {
        Response::Redirect {
            location: location.into(),
        }
    }
}
