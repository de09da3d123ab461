//! Catalog trait: the abstract interface for content metadata.
//!
//! The access path only ever reads from the catalog. Writes come from the
//! ingest side when a title is registered.

use async_trait::async_trait;

use reelgate_core::{ContentRecord, ContentRef};

use crate::error::Result;

/// Result of inserting a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertResult {
    /// Record was inserted.
    Inserted,
    /// A record with this reference already exists (not an error, not overwritten).
    AlreadyExists,
}

/// Async interface for content lookup.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Resolve a reference to its record.
    async fn lookup(&self, content_ref: &ContentRef) -> Result<Option<ContentRecord>>;

    /// Register a record.
    async fn insert(&self, record: &ContentRecord) -> Result<InsertResult>;

    /// Check whether a reference is known.
    async fn contains(&self, content_ref: &ContentRef) -> Result<bool> {
        Ok(self.lookup(content_ref).await?.is_some())
    }

    /// Number of records.
    async fn count(&self) -> Result<usize>;
}
