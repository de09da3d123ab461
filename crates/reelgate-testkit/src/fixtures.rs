//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use reelgate_access::{AccessValidator, TokenIssuer};
use reelgate_core::{ContentRecord, ContentRef, ManualClock};
use reelgate_delivery::{
    ContentDeliveryGate, DeferredActionScheduler, MemoryMessenger, SchedulerConfig,
};
use reelgate_store::{MemoryCatalog, MemoryGrantStore};

/// 2023-11-14T22:13:20Z, a fixed starting instant.
pub const T0: i64 = 1_700_000_000_000;

/// Shortener host used by fixture links.
pub const SHORTENER: &str = "get2short.com";

/// Catalog entries every fixture starts with.
pub fn sample_records() -> Vec<ContentRecord> {
    vec![
        record(
            "3f9a0c12de45b678",
            "The Quiet Harbor",
            Some("A lighthouse keeper finds a message."),
            Some(2019),
            Some("Drama"),
        ),
        record("a7c41e09b2d35f80", "Night Train", None, Some(1999), None),
        record("5e2d8b1af0c94763", "Salt Flats", None, None, Some("Documentary")),
    ]
}

fn record(
    content_ref: &str,
    title: &str,
    description: Option<&str>,
    year: Option<i32>,
    genre: Option<&str>,
) -> ContentRecord {
    ContentRecord {
        content_ref: ContentRef::try_from(content_ref).expect("fixture ref is valid"),
        title: title.to_string(),
        description: description.map(str::to_string),
        year,
        genre: genre.map(str::to_string),
        media_locator: format!("https://files.example/{content_ref}.mp4"),
    }
}

/// A shortened link pointing at `record`.
pub fn link_for(record: &ContentRecord) -> String {
    format!("https://{SHORTENER}/{}", record.content_ref)
}

/// In-memory collaborators sharing one manual clock.
pub struct TestFixture {
    pub clock: Arc<ManualClock>,
    pub grants: Arc<MemoryGrantStore>,
    pub catalog: Arc<MemoryCatalog>,
    pub messenger: Arc<MemoryMessenger>,
    pub records: Vec<ContentRecord>,
}

impl TestFixture {
    /// Create a fixture at [`T0`] with [`sample_records`] in the catalog.
    pub fn new() -> Self {
        let records = sample_records();
        Self {
            clock: Arc::new(ManualClock::new(T0)),
            grants: Arc::new(MemoryGrantStore::new()),
            catalog: Arc::new(MemoryCatalog::with_records(records.clone())),
            messenger: Arc::new(MemoryMessenger::new()),
            records,
        }
    }

    /// The first sample record.
    pub fn movie(&self) -> &ContentRecord {
        &self.records[0]
    }

    pub fn issuer(&self) -> TokenIssuer {
        TokenIssuer::new(self.grants.clone(), self.clock.clone())
    }

    pub fn validator(&self) -> AccessValidator {
        AccessValidator::new(self.grants.clone(), self.clock.clone())
    }

    pub fn scheduler(&self) -> DeferredActionScheduler {
        DeferredActionScheduler::new(
            self.messenger.clone(),
            self.clock.clone(),
            SchedulerConfig::default(),
        )
    }

    /// A delivery gate with default TTLs over this fixture's collaborators.
    pub fn delivery_gate(&self) -> ContentDeliveryGate {
        ContentDeliveryGate::new(
            Arc::new(self.validator()),
            self.catalog.clone(),
            self.messenger.clone(),
            self.scheduler(),
            self.clock.clone(),
        )
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelgate_store::ContentStore;

    #[tokio::test]
    async fn test_fixture_catalog_is_populated() {
        let fixture = TestFixture::new();
        assert_eq!(fixture.catalog.count().await.unwrap(), 3);
        assert!(fixture
            .catalog
            .contains(&fixture.movie().content_ref)
            .await
            .unwrap());
        assert_eq!(
            link_for(fixture.movie()),
            "https://get2short.com/3f9a0c12de45b678"
        );
    }
}
