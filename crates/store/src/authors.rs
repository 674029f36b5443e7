//! Author repository.

use crate::error::StoreError;
use crate::model::{Author, NewAuthor};
use chrono::Utc;
use std::sync::Arc;
use tokio_postgres::{Client, Row};

const AUTHOR_COLUMNS: &str = "id, first_name, last_name, birth_date, created_at, updated_at";

fn author_from_row(row: &Row) -> Author {
    Author {
        id: row.get("id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        birth_date: row.get("birth_date"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// CRUD access to the `author` table.
#[derive(Clone)]
pub struct AuthorRepository {
    client: Arc<Client>,
}

impl AuthorRepository {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    /// All authors, in storage order (no ordering guarantee beyond stability
    /// within one query).
    pub async fn list_all(&self) -> Result<Vec<Author>, StoreError> {
        let rows = self
            .client
            .query(&format!("SELECT {AUTHOR_COLUMNS} FROM author"), &[])
            .await?;
        Ok(rows.iter().map(author_from_row).collect())
    }

    pub async fn find(&self, id: i64) -> Result<Option<Author>, StoreError> {
        let row = self
            .client
            .query_opt(
                &format!("SELECT {AUTHOR_COLUMNS} FROM author WHERE id = $1"),
                &[&id],
            )
            .await?;
        Ok(row.as_ref().map(author_from_row))
    }

    /// Insert one author and return it with its storage-assigned id.
    pub async fn insert(&self, author: &NewAuthor) -> Result<Author, StoreError> {
        let now = Utc::now();
        let row = self
            .client
            .query_one(
                &format!(
                    "INSERT INTO author (first_name, last_name, birth_date, created_at, updated_at)
                     VALUES ($1, $2, $3, $4, $4) RETURNING {AUTHOR_COLUMNS}"
                ),
                &[
                    &author.first_name,
                    &author.last_name,
                    &author.birth_date,
                    &now,
                ],
            )
            .await?;
        Ok(author_from_row(&row))
    }

    /// Insert several authors. Used by the seeder; not batched because the
    /// seed set is tiny.
    pub async fn insert_many(&self, authors: &[NewAuthor]) -> Result<(), StoreError> {
        for author in authors {
            self.insert(author).await?;
        }
        Ok(())
    }

    /// Partial update; `None` fields keep their current value. Bumps
    /// `updated_at`.
    pub async fn update(
        &self,
        id: i64,
        first_name: Option<&str>,
        last_name: Option<&str>,
        birth_date: Option<chrono::NaiveDate>,
    ) -> Result<Author, StoreError> {
        let now = Utc::now();
        let row = self
            .client
            .query_opt(
                &format!(
                    "UPDATE author SET
                         first_name = COALESCE($2, first_name),
                         last_name = COALESCE($3, last_name),
                         birth_date = COALESCE($4, birth_date),
                         updated_at = $5
                     WHERE id = $1 RETURNING {AUTHOR_COLUMNS}"
                ),
                &[&id, &first_name, &last_name, &birth_date, &now],
            )
            .await?;
        row.as_ref()
            .map(author_from_row)
            .ok_or_else(|| StoreError::not_found("author", id))
    }

    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let n = self
            .client
            .execute("DELETE FROM author WHERE id = $1", &[&id])
            .await?;
        if n == 0 {
            return Err(StoreError::not_found("author", id));
        }
        Ok(())
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        let row = self
            .client
            .query_one("SELECT COUNT(*) FROM author", &[])
            .await?;
        Ok(row.get(0))
    }
}
