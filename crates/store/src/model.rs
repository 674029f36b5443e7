//! Domain model for the catalog.

use chrono::{DateTime, NaiveDate, Utc};

/// A book author. The id is assigned by storage on insert and never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Author {
    /// Display name, `"First Last"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Insert payload for an author. Timestamps are assigned at insert time.
#[derive(Debug, Clone)]
pub struct NewAuthor {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
}

/// A book. `author_id` references an existing `Author`.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub publication_date: NaiveDate,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a book.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub description: Option<String>,
    pub publication_date: NaiveDate,
    pub author_id: i64,
}
