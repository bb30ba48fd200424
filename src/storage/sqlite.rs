//! SQLite link cache implementation

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{LinkStore, StorageError, StorageResult};
use crate::title::{LinkSet, Title};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite-backed persistent link cache
///
/// Each `store` runs inside a transaction, so an interrupted run never leaves
/// a page row without its links. Row ids come from sqlite's AUTOINCREMENT
/// sequence, which is recovered from the file on open, so records written
/// after a restart never collide with existing ones.
pub struct SqliteLinkCache {
    conn: Connection,
}

impl SqliteLinkCache {
    /// Opens or creates a link cache database at the given path
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteLinkCache)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open or initialize the database
    pub fn new(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;

        // Configure SQLite for better performance
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory cache (for testing)
    pub fn new_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    fn page_id(&self, title: &Title) -> StorageResult<Option<i64>> {
        let id = self
            .conn
            .query_row(
                "SELECT id FROM pages WHERE title = ?1",
                params![title.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }
}

impl LinkStore for SqliteLinkCache {
    fn lookup(&self, title: &Title) -> StorageResult<Option<LinkSet>> {
        let page_id = match self.page_id(title)? {
            Some(id) => id,
            None => return Ok(None),
        };

        let mut stmt = self
            .conn
            .prepare("SELECT link FROM links WHERE page_id = ?1")?;

        let links = stmt
            .query_map(params![page_id], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        // Stored links are already normalized; normalize is idempotent
        Ok(Some(links.iter().map(|l| Title::normalize(l)).collect()))
    }

    fn store(&mut self, title: &Title, links: &LinkSet) -> StorageResult<bool> {
        let tx = self.conn.transaction()?;

        let now = Utc::now().to_rfc3339();
        let inserted = tx.execute(
            "INSERT OR IGNORE INTO pages (title, fetched_at) VALUES (?1, ?2)",
            params![title.as_str(), now],
        )?;

        if inserted == 0 {
            // Duplicate write: keep the first record untouched
            return Ok(false);
        }

        let page_id = tx.last_insert_rowid();
        {
            let mut stmt =
                tx.prepare("INSERT OR IGNORE INTO links (page_id, link) VALUES (?1, ?2)")?;
            for link in links {
                stmt.execute(params![page_id, link.as_str()])?;
            }
        }

        tx.commit()?;
        Ok(true)
    }

    fn contains(&self, title: &Title) -> StorageResult<bool> {
        Ok(self.page_id(title)?.is_some())
    }

    fn count_pages(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM pages", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn count_links(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM links", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
