//! Shared handler state.

use crate::auth::ApiKey;
use bookshelf_store::{AuthorRepository, BookRepository};
use std::sync::Arc;
use tokio_postgres::Client;

/// Repositories plus the configured API key, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub authors: AuthorRepository,
    pub books: BookRepository,
    pub api_key: ApiKey,
}

impl AppState {
    pub fn new(client: Arc<Client>, api_key: impl Into<String>) -> Self {
        Self {
            authors: AuthorRepository::new(client.clone()),
            books: BookRepository::new(client),
            api_key: ApiKey(api_key.into()),
        }
    }
}
