//! Storage traits and error types

use crate::title::{LinkSet, Title};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Database error: {0}")]
    Database(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for persistent link cache backends
///
/// A backend maps each article title to the set of titles it links out to.
/// Records are write-once: `store` for an existing title is a benign no-op,
/// which lets concurrent resolutions of the same title race harmlessly.
pub trait LinkStore {
    /// Returns the cached link set for a title, or `None` if never stored
    ///
    /// Absence is not an error; it means the title has to be fetched.
    fn lookup(&self, title: &Title) -> StorageResult<Option<LinkSet>>;

    /// Writes a new page record, committing before returning
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - A new record was written
    /// * `Ok(false)` - The title already existed; the first record is kept
    fn store(&mut self, title: &Title, links: &LinkSet) -> StorageResult<bool>;

    /// Returns true if a record exists for this title
    fn contains(&self, title: &Title) -> StorageResult<bool>;

    /// Counts cached pages
    fn count_pages(&self) -> StorageResult<u64>;

    /// Counts cached link rows across all pages
    fn count_links(&self) -> StorageResult<u64>;
}
