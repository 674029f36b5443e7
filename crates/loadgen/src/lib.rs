//! Bulk synthetic book loader.
//!
//! Generates six-figure volumes of consistent `book` rows from fixed
//! vocabularies and inserts them in bounded multi-row statements. The job is
//! strictly sequential and fail-fast: batches commit independently in order,
//! the first failing batch aborts the run, and nothing already committed is
//! rolled back.
//!
//! # Architecture
//!
//! ```text
//! LoadJob (runner)
//!    │
//!    ├── seeder      ensure a non-empty author set (fixed trio fallback)
//!    ├── vocab       title/description from fixed word lists
//!    ├── dates       publication date in a bounded historical window
//!    ├── encode      SQL literal quoting for every variable value
//!    └── batch       render one multi-row INSERT per batch and execute it
//! ```
//!
//! Randomness is reified: every generating function takes an explicit
//! `rand::Rng`, so a seeded `StdRng` reproduces a run exactly.

pub mod batch;
pub mod dates;
pub mod encode;
pub mod error;
pub mod progress;
pub mod runner;
pub mod seeder;
pub mod vocab;

pub use batch::{render_insert, BatchConfig, BookRow};
pub use error::LoadError;
pub use progress::{LogProgress, ProgressSink};
pub use runner::{LoadJob, LoadReport};
pub use seeder::{ensure_authors, SEED_AUTHORS};
