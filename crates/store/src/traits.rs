//! Narrow seams between the bulk loader and concrete storage.
//!
//! The loader never sees a `tokio_postgres::Client` directly; it works
//! against these two traits so the job runner can be exercised with
//! in-memory fakes.

use crate::error::StoreError;
use crate::model::{Author, NewAuthor};
use crate::AuthorRepository;
use async_trait::async_trait;
use tokio_postgres::Client;

/// Read/seed access to the author set.
#[async_trait]
pub trait AuthorStore: Send + Sync {
    /// All authors in storage order.
    async fn list_all(&self) -> Result<Vec<Author>, StoreError>;

    /// Insert the given authors with current timestamps.
    async fn insert_many(&self, authors: &[NewAuthor]) -> Result<(), StoreError>;
}

#[async_trait]
impl AuthorStore for AuthorRepository {
    async fn list_all(&self) -> Result<Vec<Author>, StoreError> {
        AuthorRepository::list_all(self).await
    }

    async fn insert_many(&self, authors: &[NewAuthor]) -> Result<(), StoreError> {
        AuthorRepository::insert_many(self, authors).await
    }
}

/// Raw statement execution. Each call is one round trip and one implicit
/// transaction: a multi-row insert either lands entirely or not at all.
#[async_trait]
pub trait StatementExecutor: Send {
    /// Execute one statement, returning the affected row count.
    async fn execute_statement(&mut self, sql: &str) -> Result<u64, StoreError>;
}

#[async_trait]
impl StatementExecutor for Client {
    async fn execute_statement(&mut self, sql: &str) -> Result<u64, StoreError> {
        Ok(self.execute(sql, &[]).await?)
    }
}

// The CLI shares one session between the repositories and the loader, so the
// executor is also implemented for the shared handle.
#[async_trait]
impl StatementExecutor for std::sync::Arc<Client> {
    async fn execute_statement(&mut self, sql: &str) -> Result<u64, StoreError> {
        Ok(self.execute(sql, &[]).await?)
    }
}
