//! Catalog models
//!
//! This module defines the core records stored in the three catalog
//! collections. Computed display fields (canonical URLs, the author display
//! name, formatted dates) are pure accessor methods over stored state: they
//! are recomputed on every read and never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Maximum length of an author name component
pub const NAME_MAX_LEN: usize = 100;

/// Medium date, e.g. "Oct 14, 1983"
const DATE_MED: &str = "%b %-d, %Y";
/// ISO date used to repopulate `<input type="date">` fields
const DATE_INPUT: &str = "%Y-%m-%d";

/// Book record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: Uuid,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<Uuid>,
}

impl Book {
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }
}

/// Title-only projection of a Book, used to populate selection lists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSummary {
    pub id: Uuid,
    pub title: String,
}

/// Request to create a new Book
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: Uuid,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<Uuid>,
}

/// Author record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<DateTime<Utc>>,
    pub date_of_death: Option<DateTime<Utc>>,
}

impl Author {
    /// Display name, "Family, First". Empty when either component is missing.
    pub fn name(&self) -> String {
        if !self.first_name.is_empty() && !self.family_name.is_empty() {
            format!("{}, {}", self.family_name, self.first_name)
        } else {
            String::new()
        }
    }

    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }

    /// Medium-format birth date. A single blank when unknown: the death
    /// date falls back to "Present" instead; the asymmetry is an app-level
    /// display choice and both sides of it are kept as-is.
    pub fn date_of_birth_formatted(&self) -> String {
        match self.date_of_birth {
            Some(d) => d.format(DATE_MED).to_string(),
            None => " ".to_string(),
        }
    }

    pub fn date_of_death_formatted(&self) -> String {
        match self.date_of_death {
            Some(d) => d.format(DATE_MED).to_string(),
            None => "Present".to_string(),
        }
    }

    /// Birth date in `yyyy-MM-dd` form for form repopulation; absent when
    /// the date is unknown.
    pub fn date_of_birth_input(&self) -> Option<String> {
        self.date_of_birth.map(|d| d.format(DATE_INPUT).to_string())
    }

    /// Death date in `yyyy-MM-dd` form; empty string when unknown.
    pub fn date_of_death_input(&self) -> String {
        match self.date_of_death {
            Some(d) => d.format(DATE_INPUT).to_string(),
            None => String::new(),
        }
    }
}

/// Request to create a new Author
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAuthor {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<DateTime<Utc>>,
    pub date_of_death: Option<DateTime<Utc>>,
}

/// Loan status of a physical copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InstanceStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InstanceStatus::Available => "Available",
            InstanceStatus::Maintenance => "Maintenance",
            InstanceStatus::Loaned => "Loaned",
            InstanceStatus::Reserved => "Reserved",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for InstanceStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(InstanceStatus::Available),
            "Maintenance" => Ok(InstanceStatus::Maintenance),
            "Loaned" => Ok(InstanceStatus::Loaned),
            "Reserved" => Ok(InstanceStatus::Reserved),
            _ => Err(()),
        }
    }
}

/// BookInstance record: a physical copy of a Book
///
/// `due_back` is always present on stored records: the store fills in the
/// current time when a candidate omits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookInstance {
    pub id: Uuid,
    pub book: Uuid,
    pub imprint: String,
    pub status: InstanceStatus,
    pub due_back: DateTime<Utc>,
}

impl BookInstance {
    pub fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.id)
    }
}

/// Candidate BookInstance built from sanitized input, before persistence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBookInstance {
    pub book: Uuid,
    pub imprint: String,
    pub status: InstanceStatus,
    pub due_back: Option<DateTime<Utc>>,
}

/// Field values applied by an update-by-identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstancePatch {
    pub book: Uuid,
    pub imprint: String,
    pub status: InstanceStatus,
    pub due_back: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn author(first: &str, family: &str) -> Author {
        Author {
            id: Uuid::new_v4(),
            first_name: first.to_string(),
            family_name: family.to_string(),
            date_of_birth: None,
            date_of_death: None,
        }
    }

    #[test]
    fn test_author_name_both_components() {
        assert_eq!(author("Jane", "Austen").name(), "Austen, Jane");
    }

    #[test]
    fn test_author_name_missing_component_is_empty() {
        assert_eq!(author("Jane", "").name(), "");
        assert_eq!(author("", "Austen").name(), "");
    }

    #[test]
    fn test_author_url_embeds_identity() {
        let a = author("Jane", "Austen");
        assert_eq!(a.url(), format!("/catalog/author/{}", a.id));
    }

    #[test]
    fn test_date_formatting_medium() {
        let mut a = author("Patrick", "Rothfuss");
        a.date_of_birth = Some(Utc.with_ymd_and_hms(1973, 6, 6, 0, 0, 0).unwrap());
        assert_eq!(a.date_of_birth_formatted(), "Jun 6, 1973");
        assert_eq!(a.date_of_birth_input(), Some("1973-06-06".to_string()));
    }

    #[test]
    fn test_absent_birth_date_fallbacks() {
        let a = author("Jane", "Austen");
        assert_eq!(a.date_of_birth_formatted(), " ");
        assert_eq!(a.date_of_birth_input(), None);
    }

    #[test]
    fn test_absent_death_date_fallbacks() {
        let a = author("Jane", "Austen");
        assert_eq!(a.date_of_death_formatted(), "Present");
        assert_eq!(a.date_of_death_input(), "");
    }

    #[test]
    fn test_status_default_is_maintenance() {
        assert_eq!(InstanceStatus::default(), InstanceStatus::Maintenance);
    }

    #[test]
    fn test_status_round_trips_through_display() {
        for s in [
            InstanceStatus::Available,
            InstanceStatus::Maintenance,
            InstanceStatus::Loaned,
            InstanceStatus::Reserved,
        ] {
            assert_eq!(s.to_string().parse::<InstanceStatus>(), Ok(s));
        }
        assert!("On loan".parse::<InstanceStatus>().is_err());
    }

    #[test]
    fn test_instance_url_embeds_identity() {
        let inst = BookInstance {
            id: Uuid::new_v4(),
            book: Uuid::new_v4(),
            imprint: "Penguin Classics".to_string(),
            status: InstanceStatus::Available,
            due_back: Utc::now(),
        };
        assert_eq!(inst.url(), format!("/catalog/bookinstance/{}", inst.id));
    }
}
