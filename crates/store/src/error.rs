//! Error types for the storage layer.

use thiserror::Error;

/// Errors that can occur while talking to PostgreSQL.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Connection or query error from the driver.
    #[error("PostgreSQL error: {0}")]
    PostgreSQL(#[from] tokio_postgres::Error),

    /// Row lookup by id found nothing.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        StoreError::NotFound { entity, id }
    }

    /// True when the error is a missing-row lookup rather than a driver failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
