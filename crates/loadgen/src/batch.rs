//! Batch planning and multi-row INSERT rendering.

use crate::encode::{quote_date, quote_text, quote_timestamp};
use crate::error::LoadError;
use bookshelf_store::StatementExecutor;
use chrono::{DateTime, NaiveDate, Utc};

/// Batch shape for one load run. Pure configuration.
///
/// Batching is a trade-off: one row per statement is round-trip bound and
/// collapses at six-figure counts, while one unbounded statement risks
/// statement-size limits and hides where a failure happened.
#[derive(Debug, Clone, Copy)]
pub struct BatchConfig {
    /// Rows per INSERT statement.
    pub batch_size: usize,
    /// Statements per author.
    pub batches_per_author: u32,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            batches_per_author: 100,
        }
    }
}

impl BatchConfig {
    /// Rows generated for one author.
    pub fn rows_per_author(&self) -> u64 {
        self.batch_size as u64 * u64::from(self.batches_per_author)
    }

    /// Total rows for a run; derived, never hardcoded. With the default
    /// config and the three-author seed set this is 300,000.
    pub fn total_rows(&self, author_count: usize) -> u64 {
        self.rows_per_author() * author_count as u64
    }
}

/// One fully-formed pending book row.
#[derive(Debug, Clone)]
pub struct BookRow {
    pub title: String,
    pub description: String,
    pub publication_date: NaiveDate,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Render one batch as a single multi-row INSERT statement.
///
/// Every text value goes through the encoder; nothing is concatenated raw.
pub fn render_insert(rows: &[BookRow]) -> String {
    let mut values = Vec::with_capacity(rows.len());
    for row in rows {
        values.push(format!(
            "({}, {}, {}, {}, {}, {})",
            quote_text(&row.title),
            quote_text(&row.description),
            quote_date(row.publication_date),
            row.author_id,
            quote_timestamp(row.created_at),
            quote_timestamp(row.updated_at),
        ));
    }
    format!(
        "INSERT INTO book (title, description, publication_date, author_id, created_at, updated_at) VALUES {}",
        values.join(",")
    )
}

/// Execute one batch as a single statement.
///
/// All-or-nothing at the storage layer: success means every row landed, so
/// the committed count equals the input length. On failure the offending
/// statement is surfaced and NO retry is attempted; `committed_before` lets
/// the caller report the partial total.
pub async fn insert_batch<E: StatementExecutor + ?Sized>(
    executor: &mut E,
    rows: &[BookRow],
    committed_before: u64,
) -> Result<u64, LoadError> {
    if rows.is_empty() {
        return Ok(0);
    }
    let sql = render_insert(rows);
    match executor.execute_statement(&sql).await {
        Ok(_) => Ok(rows.len() as u64),
        Err(source) => Err(LoadError::BatchInsert {
            statement: sql,
            committed: committed_before,
            source,
        }),
    }
}
