//! Error types for the bulk loader.

use bookshelf_store::StoreError;
use thiserror::Error;

/// Errors that abort a load job.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Author lookup or seed insert failed before any generation started.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    /// The author set was still empty after seeding.
    #[error("no authors available after seeding")]
    NoAuthors,

    /// One batch statement failed. The job stops here; earlier batches stay
    /// committed. The statement text is kept because an all-or-nothing batch
    /// offers no other per-row diagnostic.
    #[error("batch insert failed after {committed} committed rows: {source}")]
    BatchInsert {
        statement: String,
        committed: u64,
        #[source]
        source: StoreError,
    },
}

impl LoadError {
    /// Rows known to be committed before the failure.
    pub fn committed_rows(&self) -> u64 {
        match self {
            LoadError::BatchInsert { committed, .. } => *committed,
            _ => 0,
        }
    }
}
