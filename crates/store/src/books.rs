//! Book repository.

use crate::error::StoreError;
use crate::model::{Author, Book, NewBook};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tokio_postgres::{Client, Row};

const BOOK_COLUMNS: &str =
    "id, title, description, publication_date, author_id, created_at, updated_at";

fn book_from_row(row: &Row) -> Book {
    Book {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        publication_date: row.get("publication_date"),
        author_id: row.get("author_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// CRUD access to the `book` table.
#[derive(Clone)]
pub struct BookRepository {
    client: Arc<Client>,
}

impl BookRepository {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    /// One page of books joined with their authors, ordered by book id.
    /// `page` is 1-based.
    pub async fn list_with_authors(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<Vec<(Book, Author)>, StoreError> {
        let offset = i64::from(page.saturating_sub(1)) * i64::from(limit);
        let limit = i64::from(limit);
        let rows = self
            .client
            .query(
                "SELECT b.id, b.title, b.description, b.publication_date, b.author_id,
                        b.created_at, b.updated_at,
                        a.id AS a_id, a.first_name, a.last_name, a.birth_date,
                        a.created_at AS a_created_at, a.updated_at AS a_updated_at
                 FROM book b
                 JOIN author a ON a.id = b.author_id
                 ORDER BY b.id
                 LIMIT $1 OFFSET $2",
                &[&limit, &offset],
            )
            .await?;
        Ok(rows
            .iter()
            .map(|row| {
                let book = book_from_row(row);
                let author = Author {
                    id: row.get("a_id"),
                    first_name: row.get("first_name"),
                    last_name: row.get("last_name"),
                    birth_date: row.get("birth_date"),
                    created_at: row.get("a_created_at"),
                    updated_at: row.get("a_updated_at"),
                };
                (book, author)
            })
            .collect())
    }

    pub async fn find(&self, id: i64) -> Result<Option<Book>, StoreError> {
        let row = self
            .client
            .query_opt(
                &format!("SELECT {BOOK_COLUMNS} FROM book WHERE id = $1"),
                &[&id],
            )
            .await?;
        Ok(row.as_ref().map(book_from_row))
    }

    pub async fn insert(&self, book: &NewBook) -> Result<Book, StoreError> {
        let now = Utc::now();
        let row = self
            .client
            .query_one(
                &format!(
                    "INSERT INTO book (title, description, publication_date, author_id, created_at, updated_at)
                     VALUES ($1, $2, $3, $4, $5, $5) RETURNING {BOOK_COLUMNS}"
                ),
                &[
                    &book.title,
                    &book.description,
                    &book.publication_date,
                    &book.author_id,
                    &now,
                ],
            )
            .await?;
        Ok(book_from_row(&row))
    }

    /// Partial update; `None` fields keep their current value. Bumps
    /// `updated_at`.
    pub async fn update(
        &self,
        id: i64,
        title: Option<&str>,
        description: Option<&str>,
        publication_date: Option<NaiveDate>,
        author_id: Option<i64>,
    ) -> Result<Book, StoreError> {
        let now = Utc::now();
        let row = self
            .client
            .query_opt(
                &format!(
                    "UPDATE book SET
                         title = COALESCE($2, title),
                         description = COALESCE($3, description),
                         publication_date = COALESCE($4, publication_date),
                         author_id = COALESCE($5, author_id),
                         updated_at = $6
                     WHERE id = $1 RETURNING {BOOK_COLUMNS}"
                ),
                &[&id, &title, &description, &publication_date, &author_id, &now],
            )
            .await?;
        row.as_ref()
            .map(book_from_row)
            .ok_or_else(|| StoreError::not_found("book", id))
    }

    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let n = self
            .client
            .execute("DELETE FROM book WHERE id = $1", &[&id])
            .await?;
        if n == 0 {
            return Err(StoreError::not_found("book", id));
        }
        Ok(())
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        let row = self.client.query_one("SELECT COUNT(*) FROM book", &[]).await?;
        Ok(row.get(0))
    }
}
