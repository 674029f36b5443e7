//! The load job: seed authors, then generate and insert batches in order.

use crate::batch::{insert_batch, BatchConfig, BookRow};
use crate::error::LoadError;
use crate::progress::ProgressSink;
use crate::seeder::ensure_authors;
use crate::{dates, vocab};
use bookshelf_store::{AuthorStore, StatementExecutor};
use chrono::{Duration, Utc};
use rand::Rng;
use std::time::Instant;
use tracing::debug;

/// Outcome of a completed load job.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Rows committed across all batches.
    pub rows_committed: u64,
    /// Batches executed.
    pub batch_count: u64,
    /// Wall-clock time for the whole job.
    pub total_duration: std::time::Duration,
    /// Time spent generating rows.
    pub generation_duration: std::time::Duration,
    /// Time spent waiting on inserts.
    pub insert_duration: std::time::Duration,
}

impl LoadReport {
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.rows_committed as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// One sequential bulk load run.
///
/// Authors are processed one at a time and batches strictly in order; the
/// insert round trip is the only suspension point. Each batch is its own
/// committed unit: the first failure stops the job and nothing already
/// committed is rolled back.
#[derive(Debug, Clone, Copy)]
pub struct LoadJob {
    config: BatchConfig,
    /// Historical window for publication dates, counted back from now.
    lookback: Duration,
}

impl Default for LoadJob {
    fn default() -> Self {
        Self::new(BatchConfig::default())
    }
}

impl LoadJob {
    pub fn new(config: BatchConfig) -> Self {
        Self {
            config,
            lookback: Duration::days(365 * 10),
        }
    }

    pub fn with_lookback(mut self, lookback: Duration) -> Self {
        self.lookback = lookback;
        self
    }

    /// Run the job to completion or first failure.
    ///
    /// On failure the error carries the committed-so-far count; committed
    /// batches remain in storage.
    pub async fn run<S, E, P, R>(
        &self,
        authors: &S,
        executor: &mut E,
        progress: &mut P,
        rng: &mut R,
    ) -> Result<LoadReport, LoadError>
    where
        S: AuthorStore + ?Sized,
        E: StatementExecutor + ?Sized,
        P: ProgressSink + ?Sized,
        R: Rng + ?Sized,
    {
        let start = Instant::now();

        let authors = match ensure_authors(authors).await {
            Ok(authors) => authors,
            Err(e) => {
                progress.failed(&e.to_string(), None);
                return Err(e);
            }
        };

        let mut report = LoadReport::default();
        progress.started(self.config.total_rows(authors.len()));

        for author in &authors {
            progress.author_started(author);

            for batch_index in 0..self.config.batches_per_author {
                let gen_start = Instant::now();
                let mut rows = Vec::with_capacity(self.config.batch_size);
                for i in 0..self.config.batch_size {
                    // 0-based across the author's whole run, not per batch.
                    let sequence_index =
                        u64::from(batch_index) * self.config.batch_size as u64 + i as u64;
                    let text = vocab::generate(rng, sequence_index, author);
                    let now = Utc::now();
                    rows.push(BookRow {
                        title: text.title,
                        description: text.description,
                        publication_date: dates::random_date(rng, now, self.lookback),
                        author_id: author.id,
                        created_at: now,
                        updated_at: now,
                    });
                }
                report.generation_duration += gen_start.elapsed();

                let insert_start = Instant::now();
                let result = insert_batch(executor, &rows, report.rows_committed).await;
                report.insert_duration += insert_start.elapsed();

                match result {
                    Ok(committed) => {
                        report.rows_committed += committed;
                        report.batch_count += 1;
                        progress.batch_committed(committed);
                        debug!(
                            "Batch {}/{} for author {} committed ({} rows total)",
                            batch_index + 1,
                            self.config.batches_per_author,
                            author.id,
                            report.rows_committed
                        );
                    }
                    Err(e) => {
                        let statement = match &e {
                            LoadError::BatchInsert { statement, .. } => Some(statement.as_str()),
                            _ => None,
                        };
                        progress.failed(&e.to_string(), statement);
                        return Err(e);
                    }
                }
            }
        }

        report.total_duration = start.elapsed();
        progress.finished(report.rows_committed);
        Ok(report)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use bookshelf_store::{Author, NewAuthor, StoreError};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Mutex;

    /// In-memory author store for runner and seeder tests.
    pub(crate) struct MemoryAuthorStore {
        authors: Mutex<Vec<Author>>,
        inserted: Mutex<usize>,
        fail: bool,
    }

    impl MemoryAuthorStore {
        pub(crate) fn empty() -> Self {
            Self {
                authors: Mutex::new(Vec::new()),
                inserted: Mutex::new(0),
                fail: false,
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                fail: true,
                ..Self::empty()
            }
        }

        pub(crate) fn with_authors(names: Vec<(&str, &str)>) -> Self {
            let now = Utc::now();
            let authors = names
                .into_iter()
                .enumerate()
                .map(|(i, (first, last))| Author {
                    id: i as i64 + 1,
                    first_name: first.to_string(),
                    last_name: last.to_string(),
                    birth_date: chrono::NaiveDate::from_ymd_opt(1950, 1, 1).unwrap(),
                    created_at: now,
                    updated_at: now,
                })
                .collect();
            Self {
                authors: Mutex::new(authors),
                inserted: Mutex::new(0),
                fail: false,
            }
        }

        pub(crate) fn inserted(&self) -> usize {
            *self.inserted.lock().unwrap()
        }
    }

    #[async_trait]
    impl AuthorStore for MemoryAuthorStore {
        async fn list_all(&self) -> Result<Vec<Author>, StoreError> {
            if self.fail {
                return Err(StoreError::not_found("author", -1));
            }
            Ok(self.authors.lock().unwrap().clone())
        }

        async fn insert_many(&self, new: &[NewAuthor]) -> Result<(), StoreError> {
            let mut authors = self.authors.lock().unwrap();
            let mut inserted = self.inserted.lock().unwrap();
            for author in new {
                let id = authors.len() as i64 + 1;
                let now = Utc::now();
                authors.push(Author {
                    id,
                    first_name: author.first_name.clone(),
                    last_name: author.last_name.clone(),
                    birth_date: author.birth_date,
                    created_at: now,
                    updated_at: now,
                });
                *inserted += 1;
            }
            Ok(())
        }
    }

    /// Executor that records statements and optionally fails on the nth call.
    struct RecordingExecutor {
        statements: Vec<String>,
        fail_on_call: Option<usize>,
    }

    impl RecordingExecutor {
        fn new() -> Self {
            Self {
                statements: Vec::new(),
                fail_on_call: None,
            }
        }

        fn failing_on(call: usize) -> Self {
            Self {
                statements: Vec::new(),
                fail_on_call: Some(call),
            }
        }
    }

    #[async_trait]
    impl StatementExecutor for RecordingExecutor {
        async fn execute_statement(&mut self, sql: &str) -> Result<u64, StoreError> {
            self.statements.push(sql.to_string());
            if self.fail_on_call == Some(self.statements.len()) {
                return Err(StoreError::not_found("book", 0));
            }
            Ok(0)
        }
    }

    #[derive(Debug, PartialEq)]
    enum Event {
        Started(u64),
        Author(String),
        Batch(u64),
        Finished(u64),
        Failed { has_statement: bool },
    }

    #[derive(Default)]
    struct RecordingSink {
        events: Vec<Event>,
    }

    impl ProgressSink for RecordingSink {
        fn started(&mut self, total_rows: u64) {
            self.events.push(Event::Started(total_rows));
        }
        fn author_started(&mut self, author: &Author) {
            self.events.push(Event::Author(author.full_name()));
        }
        fn batch_committed(&mut self, rows: u64) {
            self.events.push(Event::Batch(rows));
        }
        fn finished(&mut self, total_rows: u64) {
            self.events.push(Event::Finished(total_rows));
        }
        fn failed(&mut self, _message: &str, statement: Option<&str>) {
            self.events.push(Event::Failed {
                has_statement: statement.is_some(),
            });
        }
    }

    fn small_job(batch_size: usize, batches_per_author: u32) -> LoadJob {
        LoadJob::new(BatchConfig {
            batch_size,
            batches_per_author,
        })
    }

    #[tokio::test]
    async fn commits_every_batch_for_every_author_in_order() {
        let store = MemoryAuthorStore::with_authors(vec![("Ann", "Leckie"), ("Ted", "Chiang")]);
        let mut executor = RecordingExecutor::new();
        let mut sink = RecordingSink::default();
        let mut rng = StdRng::seed_from_u64(42);

        let report = small_job(5, 3)
            .run(&store, &mut executor, &mut sink, &mut rng)
            .await
            .unwrap();

        assert_eq!(report.rows_committed, 30);
        assert_eq!(report.batch_count, 6);
        assert_eq!(executor.statements.len(), 6);

        // Five value tuples per statement.
        for sql in &executor.statements {
            assert_eq!(sql.matches("),(").count(), 4, "statement: {sql}");
        }

        // Sequence index runs 0..15 within one author and restarts for the next.
        assert!(executor.statements[0].contains("#0'") || executor.statements[0].contains("#0 "));
        assert!(executor.statements[2].contains("#14"));
        assert!(executor.statements[3].contains("#0"));
        assert!(executor.statements[1].contains("by Ann Leckie"));
        assert!(executor.statements[4].contains("by Ted Chiang"));

        assert_eq!(
            sink.events,
            vec![
                Event::Started(30),
                Event::Author("Ann Leckie".to_string()),
                Event::Batch(5),
                Event::Batch(5),
                Event::Batch(5),
                Event::Author("Ted Chiang".to_string()),
                Event::Batch(5),
                Event::Batch(5),
                Event::Batch(5),
                Event::Finished(30),
            ]
        );
    }

    #[tokio::test]
    async fn empty_store_is_seeded_and_totals_derive_from_three_authors() {
        let store = MemoryAuthorStore::empty();
        let mut executor = RecordingExecutor::new();
        let mut sink = RecordingSink::default();
        let mut rng = StdRng::seed_from_u64(1);

        let report = small_job(10, 2)
            .run(&store, &mut executor, &mut sink, &mut rng)
            .await
            .unwrap();

        // 3 seeded authors x 2 batches x 10 rows.
        assert_eq!(store.inserted(), 3);
        assert_eq!(report.rows_committed, 60);
        assert_eq!(sink.events[0], Event::Started(60));
        assert!(executor
            .statements
            .iter()
            .any(|sql| sql.contains("by Stephen King")));
    }

    #[tokio::test]
    async fn single_existing_author_yields_batches_times_size() {
        let store = MemoryAuthorStore::with_authors(vec![("N.K.", "Jemisin")]);
        let mut executor = RecordingExecutor::new();
        let mut sink = RecordingSink::default();
        let mut rng = StdRng::seed_from_u64(7);

        let report = small_job(25, 4)
            .run(&store, &mut executor, &mut sink, &mut rng)
            .await
            .unwrap();

        assert_eq!(report.rows_committed, 100);
        assert_eq!(executor.statements.len(), 4);
        assert_eq!(store.inserted(), 0);
    }

    #[tokio::test]
    async fn stops_at_the_first_failing_batch_without_rollback() {
        let store = MemoryAuthorStore::with_authors(vec![("Iain", "Banks")]);
        // Batch 5 of 100 fails.
        let mut executor = RecordingExecutor::failing_on(5);
        let mut sink = RecordingSink::default();
        let mut rng = StdRng::seed_from_u64(42);

        let err = small_job(10, 100)
            .run(&store, &mut executor, &mut sink, &mut rng)
            .await
            .unwrap_err();

        // Batches 1-4 stay committed, 6..100 were never attempted.
        assert_eq!(err.committed_rows(), 40);
        assert_eq!(executor.statements.len(), 5);
        match &err {
            LoadError::BatchInsert { statement, .. } => {
                assert!(statement.starts_with("INSERT INTO book"));
            }
            other => panic!("unexpected error: {other}"),
        }

        assert_eq!(
            sink.events.last(),
            Some(&Event::Failed {
                has_statement: true
            })
        );
        assert!(!sink
            .events
            .iter()
            .any(|e| matches!(e, Event::Finished(_))));
        let committed: u64 = sink
            .events
            .iter()
            .filter_map(|e| match e {
                Event::Batch(n) => Some(*n),
                _ => None,
            })
            .sum();
        assert_eq!(committed, 40);
    }

    #[tokio::test]
    async fn author_store_failure_reports_and_aborts_before_generation() {
        let store = MemoryAuthorStore::failing();
        let mut executor = RecordingExecutor::new();
        let mut sink = RecordingSink::default();
        let mut rng = StdRng::seed_from_u64(0);

        let err = small_job(10, 10)
            .run(&store, &mut executor, &mut sink, &mut rng)
            .await
            .unwrap_err();

        assert!(matches!(err, LoadError::Storage(_)));
        assert!(executor.statements.is_empty());
        assert_eq!(
            sink.events,
            vec![Event::Failed {
                has_statement: false
            }]
        );
    }
}
