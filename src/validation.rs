//! Form input validation pipeline
//!
//! Validates the raw key/value pairs posted for a BookInstance. The pipeline
//! never fails: it always returns a structured outcome carrying the ordered
//! error list and the sanitized value of every field, so a failed submission
//! can re-render the form with the user's input preserved.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw form fields for a BookInstance, as posted
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstanceInput {
    pub book: Option<String>,
    pub imprint: Option<String>,
    pub status: Option<String>,
    pub due_back: Option<String>,
}

/// A field-scoped validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Per-field sanitized values, available regardless of validation outcome
#[derive(Debug, Clone, Default, Serialize)]
pub struct SanitizedInstance {
    pub book: String,
    pub imprint: String,
    pub status: String,
    pub due_back: Option<DateTime<Utc>>,
}

/// Result of running the pipeline. Errors appear in field-rule order.
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    pub errors: Vec<FieldError>,
    pub values: SanitizedInstance,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Escape markup-significant characters, matching what the form layer
/// expects back when repopulating fields.
pub fn escape_markup(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            _ => out.push(c),
        }
    }
    out
}

fn require_trimmed(
    raw: Option<&str>,
    field: &str,
    message: &str,
    errors: &mut Vec<FieldError>,
) -> String {
    let trimmed = raw.unwrap_or("").trim();
    if trimmed.is_empty() {
        errors.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }
    escape_markup(trimmed)
}

/// Strict ISO-8601 date: either a full RFC 3339 timestamp or a plain
/// `yyyy-MM-dd` calendar date (taken as midnight UTC).
fn parse_iso_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

/// Run the BookInstance field rules, in order:
/// 1. `book`: trim, non-empty, escape
/// 2. `imprint`: trim, non-empty, escape
/// 3. `status`: escape only
/// 4. `due_back`: skipped entirely when absent or empty; otherwise must
///    parse as a strict ISO-8601 date
pub fn validate_instance_input(input: &InstanceInput) -> ValidationOutcome {
    let mut errors = Vec::new();

    let book = require_trimmed(
        input.book.as_deref(),
        "book",
        "Book must be specified",
        &mut errors,
    );
    let imprint = require_trimmed(
        input.imprint.as_deref(),
        "imprint",
        "Imprint must be specified",
        &mut errors,
    );
    let status = escape_markup(input.status.as_deref().unwrap_or(""));

    let due_back = match input.due_back.as_deref() {
        None | Some("") => None,
        Some(raw) => match parse_iso_date(raw) {
            Some(date) => Some(date),
            None => {
                errors.push(FieldError {
                    field: "due_back".to_string(),
                    message: "Invalid date".to_string(),
                });
                None
            }
        },
    };

    ValidationOutcome {
        errors,
        values: SanitizedInstance {
            book,
            imprint,
            status,
            due_back,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn input(book: &str, imprint: &str, status: &str, due_back: &str) -> InstanceInput {
        InstanceInput {
            book: Some(book.to_string()),
            imprint: Some(imprint.to_string()),
            status: Some(status.to_string()),
            due_back: Some(due_back.to_string()),
        }
    }

    #[test]
    fn test_blank_book_yields_single_exact_error() {
        let outcome = validate_instance_input(&input(" ", "Penguin", "Available", ""));
        assert_eq!(
            outcome.errors,
            vec![FieldError {
                field: "book".to_string(),
                message: "Book must be specified".to_string(),
            }]
        );
        assert!(outcome.values.due_back.is_none());
        assert_eq!(outcome.values.status, "Available");
        // the failing field still has a sanitized (empty) value
        assert_eq!(outcome.values.book, "");
        assert_eq!(outcome.values.imprint, "Penguin");
    }

    #[test]
    fn test_invalid_date_yields_single_exact_error() {
        let id = uuid::Uuid::new_v4().to_string();
        let outcome = validate_instance_input(&input(&id, "X", "Loaned", "2023-13-40"));
        assert_eq!(
            outcome.errors,
            vec![FieldError {
                field: "due_back".to_string(),
                message: "Invalid date".to_string(),
            }]
        );
    }

    #[test]
    fn test_errors_keep_field_rule_order() {
        let outcome = validate_instance_input(&InstanceInput {
            book: None,
            imprint: Some("  ".to_string()),
            status: None,
            due_back: Some("not-a-date".to_string()),
        });
        let fields: Vec<&str> = outcome.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["book", "imprint", "due_back"]);
    }

    #[test]
    fn test_empty_due_back_is_skipped() {
        let outcome = validate_instance_input(&InstanceInput {
            book: Some("abc".to_string()),
            imprint: Some("Imprint".to_string()),
            status: None,
            due_back: None,
        });
        assert!(outcome.is_valid());
        assert!(outcome.values.due_back.is_none());
    }

    #[test]
    fn test_plain_date_parses_to_midnight_utc() {
        let outcome = validate_instance_input(&input("abc", "Imprint", "", "2023-06-06"));
        assert!(outcome.is_valid());
        let date = outcome.values.due_back.unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2023, 6, 6));
    }

    #[test]
    fn test_rfc3339_timestamp_accepted() {
        let outcome = validate_instance_input(&input("abc", "Imprint", "", "2023-06-06T10:30:00Z"));
        assert!(outcome.is_valid());
        assert!(outcome.values.due_back.is_some());
    }

    #[test]
    fn test_markup_is_escaped_but_input_preserved() {
        let outcome = validate_instance_input(&input("<id>", "O'Reilly & Sons", "", ""));
        assert_eq!(outcome.values.book, "&lt;id&gt;");
        assert_eq!(outcome.values.imprint, "O&#x27;Reilly &amp; Sons");
        assert!(outcome.is_valid());
    }
}
