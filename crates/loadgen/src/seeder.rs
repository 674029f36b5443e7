//! Baseline author seeding.

use crate::error::LoadError;
use bookshelf_store::{Author, AuthorStore, NewAuthor};
use chrono::NaiveDate;
use tracing::info;

/// The fixed fallback authors created when the author table is empty.
pub const SEED_AUTHORS: &[(&str, &str, (i32, u32, u32))] = &[
    ("Stephen", "King", (1947, 9, 21)),
    ("J.K.", "Rowling", (1965, 7, 31)),
    ("George R.R.", "Martin", (1948, 9, 20)),
];

fn seed_set() -> Vec<NewAuthor> {
    SEED_AUTHORS
        .iter()
        .map(|(first, last, (y, m, d))| NewAuthor {
            first_name: (*first).to_string(),
            last_name: (*last).to_string(),
            birth_date: NaiveDate::from_ymd_opt(*y, *m, *d)
                .unwrap_or_else(|| panic!("invalid seed birth date {y}-{m}-{d}")),
        })
        .collect()
}

/// Return the stored author set, creating the fixed seed trio first if the
/// table is empty. Storage failure here aborts the job before any
/// generation; generation must not proceed on an empty set.
pub async fn ensure_authors<S: AuthorStore + ?Sized>(store: &S) -> Result<Vec<Author>, LoadError> {
    let authors = store.list_all().await?;
    if !authors.is_empty() {
        return Ok(authors);
    }

    info!("No authors found, creating seed set of {}", SEED_AUTHORS.len());
    store.insert_many(&seed_set()).await?;

    let authors = store.list_all().await?;
    if authors.is_empty() {
        return Err(LoadError::NoAuthors);
    }
    Ok(authors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::tests::MemoryAuthorStore;

    #[tokio::test]
    async fn existing_authors_are_returned_unchanged() {
        let store = MemoryAuthorStore::with_authors(vec![("Ursula", "Le Guin")]);
        let authors = ensure_authors(&store).await.unwrap();
        assert_eq!(authors.len(), 1);
        assert_eq!(authors[0].first_name, "Ursula");
        assert_eq!(store.inserted(), 0);
    }

    #[tokio::test]
    async fn empty_store_gets_exactly_the_seed_trio() {
        let store = MemoryAuthorStore::empty();
        let authors = ensure_authors(&store).await.unwrap();

        assert_eq!(authors.len(), 3);
        assert_eq!(store.inserted(), 3);
        let names: Vec<String> = authors.iter().map(|a| a.full_name()).collect();
        assert_eq!(
            names,
            vec!["Stephen King", "J.K. Rowling", "George R.R. Martin"]
        );
        assert_eq!(
            authors[0].birth_date,
            NaiveDate::from_ymd_opt(1947, 9, 21).unwrap()
        );
    }

    #[tokio::test]
    async fn storage_failure_aborts_before_generation() {
        let store = MemoryAuthorStore::failing();
        let err = ensure_authors(&store).await.unwrap_err();
        assert!(matches!(err, LoadError::Storage(_)));
    }
}
