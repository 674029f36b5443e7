//! PostgreSQL storage layer for the bookshelf catalog.
//!
//! Provides the domain model (`Author`, `Book`), repositories over
//! `tokio-postgres`, the embedded schema DDL, and the narrow traits
//! (`AuthorStore`, `StatementExecutor`) that the bulk loader depends on
//! instead of concrete connections.

pub mod authors;
pub mod books;
pub mod connect;
pub mod error;
pub mod model;
pub mod schema;
pub mod traits;

pub use authors::AuthorRepository;
pub use books::BookRepository;
pub use connect::connect;
pub use error::StoreError;
pub use model::{Author, Book, NewAuthor, NewBook};
pub use traits::{AuthorStore, StatementExecutor};
