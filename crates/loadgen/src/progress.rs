//! Progress reporting for load jobs.

use bookshelf_store::Author;

/// Sink for job progress events.
///
/// Events arrive in a fixed order: `started` once, then per author one
/// `author_started` followed by one `batch_committed` per committed batch,
/// then exactly one of `finished` or `failed`.
pub trait ProgressSink: Send {
    /// The job is starting; `total_rows` is the target row count.
    fn started(&mut self, total_rows: u64);

    /// Generation for this author is beginning.
    fn author_started(&mut self, author: &Author);

    /// One batch committed; `rows` is that batch's size.
    fn batch_committed(&mut self, rows: u64);

    /// The whole job committed; `total_rows` is the final count.
    fn finished(&mut self, total_rows: u64);

    /// The job aborted. `statement` is the failing statement text when the
    /// failure was a batch insert.
    fn failed(&mut self, message: &str, statement: Option<&str>);
}

/// Default sink: structured log lines via `tracing`.
#[derive(Debug, Default)]
pub struct LogProgress {
    committed: u64,
}

impl ProgressSink for LogProgress {
    fn started(&mut self, total_rows: u64) {
        tracing::info!("Generating {} books", total_rows);
    }

    fn author_started(&mut self, author: &Author) {
        tracing::info!("Generating books for: {}", author.full_name());
    }

    fn batch_committed(&mut self, rows: u64) {
        self.committed += rows;
        tracing::debug!("Batch committed: {} rows ({} total)", rows, self.committed);
    }

    fn finished(&mut self, total_rows: u64) {
        tracing::info!("Generated {} books successfully", total_rows);
    }

    fn failed(&mut self, message: &str, statement: Option<&str>) {
        tracing::error!("Load job failed: {}", message);
        if let Some(sql) = statement {
            // The statement is the only per-row diagnostic an all-or-nothing
            // batch offers, so it is worth the log volume.
            tracing::error!("Problematic SQL: {}", sql);
        }
    }
}
