//! Embedded schema DDL for the catalog tables.
//!
//! The bulk loader assumes these tables already exist; `ensure_schema` is a
//! bootstrap convenience for the `init-db` subcommand and integration tests,
//! not a migration facility.

use crate::error::StoreError;
use tokio_postgres::Client;
use tracing::info;

pub const CREATE_AUTHOR_TABLE: &str = "CREATE TABLE IF NOT EXISTS author (
    id BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    birth_date DATE NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
)";

pub const CREATE_BOOK_TABLE: &str = "CREATE TABLE IF NOT EXISTS book (
    id BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT,
    publication_date DATE NOT NULL,
    author_id BIGINT NOT NULL REFERENCES author(id),
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
)";

/// Create the author and book tables if they do not exist yet.
pub async fn ensure_schema(client: &Client) -> Result<(), StoreError> {
    info!("Ensuring catalog schema (author, book)");
    client.batch_execute(CREATE_AUTHOR_TABLE).await?;
    client.batch_execute(CREATE_BOOK_TABLE).await?;
    Ok(())
}
