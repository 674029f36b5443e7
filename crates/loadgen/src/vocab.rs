//! Synthetic title/description generation from fixed word lists.

use bookshelf_store::Author;
use rand::Rng;

pub const ADJECTIVES: &[&str] = &[
    "Dark",
    "Mysterious",
    "Lost",
    "Forgotten",
    "Hidden",
    "Secret",
    "Ancient",
    "Digital",
];

pub const NOUNS: &[&str] = &[
    "World", "Kingdom", "Empire", "City", "Forest", "Ocean", "Mountain", "Star",
];

pub const GENRES: &[&str] = &[
    "Fantasy", "Sci-Fi", "Mystery", "Romance", "Thriller", "Horror",
];

/// Generated text fields for one book.
#[derive(Debug, Clone, PartialEq)]
pub struct BookText {
    pub title: String,
    pub description: String,
}

/// Generate the text fields for the `sequence_index`-th book of an author's
/// run.
///
/// Adjective, noun, and genre are drawn independently and uniformly.
/// `sequence_index` is 0-based over the author's whole run (not reset per
/// batch) and only provides human-readable uniqueness; it is not a key.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, sequence_index: u64, author: &Author) -> BookText {
    let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.random_range(0..NOUNS.len())];
    let genre = GENRES[rng.random_range(0..GENRES.len())];

    BookText {
        title: format!("{adjective} {noun} #{sequence_index}"),
        description: format!(
            "A {genre} novel by {} {}",
            author.first_name, author.last_name
        ),
    }
}
