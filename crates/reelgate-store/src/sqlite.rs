//! SQLite implementation of the ContentStore trait.
//!
//! Uses rusqlite with bundled SQLite, wrapped in async via
//! `tokio::task::spawn_blocking`.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use reelgate_core::{Clock, ContentRecord, ContentRef, SystemClock};

use crate::catalog::{ContentStore, InsertResult};
use crate::error::{Result, StoreError};
use crate::migration;

/// SQLite-backed catalog.
///
/// Thread-safe via internal Mutex.
pub struct SqliteCatalog {
    conn: Arc<Mutex<Connection>>,
    clock: Arc<dyn Clock>,
}

impl SqliteCatalog {
    /// Open a catalog database at the given path, creating and migrating it
    /// as needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn, Arc::new(SystemClock))
    }

    /// Open an in-memory catalog. Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn, Arc::new(SystemClock))
    }

    /// Wrap an existing connection, stamping rows with `clock`.
    pub fn from_connection(mut conn: Connection, clock: Arc<dyn Clock>) -> Result<Self> {
        migration::migrate(&mut conn, clock.now_millis())?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            clock,
        })
    }

    /// Run `f` against the connection on the blocking pool.
    async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| StoreError::LockPoisoned(format!("catalog connection: {}", e)))?;
            f(&conn)
        })
        .await
        .map_err(|e| StoreError::Background(format!("spawn_blocking failed: {}", e)))?
    }
}

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<ContentRecord> {
    let content_ref: String = row.get("content_ref")?;
    let content_ref = ContentRef::parse(&content_ref).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(ContentRecord {
        content_ref,
        title: row.get("title")?,
        description: row.get("description")?,
        year: row.get("year")?,
        genre: row.get("genre")?,
        media_locator: row.get("media_locator")?,
    })
}

#[async_trait]
impl ContentStore for SqliteCatalog {
    async fn lookup(&self, content_ref: &ContentRef) -> Result<Option<ContentRecord>> {
        let content_ref = content_ref.clone();

        self.run(move |conn| {
            conn.query_row(
                "SELECT content_ref, title, description, year, genre, media_locator
                 FROM content WHERE content_ref = ?1",
                params![content_ref.as_str()],
                row_to_record,
            )
            .optional()
            .map_err(StoreError::from)
        })
        .await
    }

    async fn insert(&self, record: &ContentRecord) -> Result<InsertResult> {
        let record = record.clone();
        let now = self.clock.now_millis();

        self.run(move |conn| {
            let inserted = conn.execute(
                "INSERT OR IGNORE INTO content (
                    content_ref, title, description, year, genre, media_locator, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    record.content_ref.as_str(),
                    record.title,
                    record.description,
                    record.year,
                    record.genre,
                    record.media_locator,
                    now,
                ],
            )?;

            if inserted == 0 {
                Ok(InsertResult::AlreadyExists)
            } else {
                Ok(InsertResult::Inserted)
            }
        })
        .await
    }

    async fn contains(&self, content_ref: &ContentRef) -> Result<bool> {
        let content_ref = content_ref.clone();

        self.run(move |conn| {
            let found: Option<i64> = conn
                .query_row(
                    "SELECT 1 FROM content WHERE content_ref = ?1",
                    params![content_ref.as_str()],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(found.is_some())
        })
        .await
    }

    async fn count(&self) -> Result<usize> {
        self.run(|conn| {
            let n: i64 = conn.query_row("SELECT COUNT(*) FROM content", [], |row| row.get(0))?;
            usize::try_from(n).map_err(|_| StoreError::InvalidData(format!("row count {}", n)))
        })
        .await
    }
}
