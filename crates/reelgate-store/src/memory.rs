//! In-memory implementation of the ContentStore trait.
//!
//! Same semantics as SQLite, no persistence.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use reelgate_core::{ContentRecord, ContentRef};

use crate::catalog::{ContentStore, InsertResult};
use crate::error::{Result, StoreError};

/// In-memory catalog.
#[derive(Default)]
pub struct MemoryCatalog {
    records: RwLock<HashMap<ContentRef, ContentRecord>>,
}

impl MemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog pre-filled with `records`.
    pub fn with_records(records: impl IntoIterator<Item = ContentRecord>) -> Self {
        let map = records
            .into_iter()
            .map(|r| (r.content_ref.clone(), r))
            .collect();
        Self {
            records: RwLock::new(map),
        }
    }
}

#[async_trait]
impl ContentStore for MemoryCatalog {
    async fn lookup(&self, content_ref: &ContentRef) -> Result<Option<ContentRecord>> {
        let records = self
            .records
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        Ok(records.get(content_ref).cloned())
    }

    async fn insert(&self, record: &ContentRecord) -> Result<InsertResult> {
        let mut records = self
            .records
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;

        if records.contains_key(&record.content_ref) {
            return Ok(InsertResult::AlreadyExists);
        }
        records.insert(record.content_ref.clone(), record.clone());
        Ok(InsertResult::Inserted)
    }

    async fn count(&self) -> Result<usize> {
        let records = self
            .records
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(r: &str) -> ContentRecord {
        ContentRecord {
            content_ref: ContentRef::parse(r).unwrap(),
            title: format!("title {}", r),
            description: None,
            year: None,
            genre: None,
            media_locator: format!("https://cdn.example/{}.mp4", r),
        }
    }

    #[tokio::test]
    async fn test_memory_catalog_basic() {
        let catalog = MemoryCatalog::new();
        let rec = record("a1");

        assert_eq!(catalog.insert(&rec).await.unwrap(), InsertResult::Inserted);
        assert_eq!(
            catalog.lookup(&rec.content_ref).await.unwrap(),
            Some(rec.clone())
        );
        assert!(catalog.contains(&rec.content_ref).await.unwrap());
    }

    #[tokio::test]
    async fn test_memory_catalog_idempotent() {
        let catalog = MemoryCatalog::with_records([record("a1")]);
        let mut other = record("a1");
        other.title = "changed".into();

        assert_eq!(
            catalog.insert(&other).await.unwrap(),
            InsertResult::AlreadyExists
        );
        let kept = catalog.lookup(&other.content_ref).await.unwrap().unwrap();
        assert_eq!(kept.title, "title a1");
        assert_eq!(catalog.count().await.unwrap(), 1);
    }
}
