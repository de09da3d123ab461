//! Registering titles in the catalog.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use reelgate_core::{Clock, ContentRecord, ContentRef, SourcePlatform};
use reelgate_store::{ContentStore, InsertResult};

use crate::error::{GateError, Result};

const CONTENT_REF_DOMAIN: &[u8] = b"reelgate:content-ref:v1";

/// Digest bytes kept in a content reference (16 hex characters).
pub const CONTENT_REF_BYTES: usize = 8;

/// A title to register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTitle {
    pub title: String,
    pub media_locator: String,
    pub platform: SourcePlatform,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub genre: Option<String>,
}

impl NewTitle {
    /// Build from a platform name as typed by an operator.
    pub fn new(
        title: impl Into<String>,
        media_locator: impl Into<String>,
        platform: &str,
    ) -> Result<Self> {
        Ok(Self {
            title: title.into(),
            media_locator: media_locator.into(),
            platform: platform.parse()?,
            description: None,
            year: None,
            genre: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }
}

/// Derive the content reference for a title registered at `now` (Unix ms).
///
/// Fields are length-prefixed so that no two inputs share an encoding.
pub fn derive_content_ref(title: &str, media_locator: &str, now: i64) -> ContentRef {
    let mut hasher = blake3::Hasher::new();
    hasher.update(CONTENT_REF_DOMAIN);
    for field in [title.as_bytes(), media_locator.as_bytes()] {
        hasher.update(&(field.len() as u64).to_le_bytes());
        hasher.update(field);
    }
    hasher.update(&now.to_le_bytes());

    let digest = hasher.finalize();
    ContentRef::from_digest(&digest.as_bytes()[..CONTENT_REF_BYTES])
}

/// Writes new titles into the catalog.
pub struct CatalogIngest {
    catalog: Arc<dyn ContentStore>,
    clock: Arc<dyn Clock>,
}

impl CatalogIngest {
    pub fn new(catalog: Arc<dyn ContentStore>, clock: Arc<dyn Clock>) -> Self {
        Self { catalog, clock }
    }

    /// Register a title and return its stored record.
    pub async fn register(&self, title: NewTitle) -> Result<ContentRecord> {
        let now = self.clock.now_millis();
        let content_ref = derive_content_ref(&title.title, &title.media_locator, now);

        let record = ContentRecord {
            content_ref,
            title: title.title,
            description: title.description,
            year: title.year,
            genre: title.genre,
            media_locator: title.media_locator,
        };

        match self.catalog.insert(&record).await? {
            InsertResult::Inserted => {
                tracing::info!(
                    content_ref = %record.content_ref,
                    title = %record.title,
                    platform = %title.platform,
                    "registered title"
                );
                Ok(record)
            }
            InsertResult::AlreadyExists => Err(GateError::DuplicateContent(record.content_ref)),
        }
    }
}
