//! Catalog ingest, the persistent catalog and the grant sweeper, wired
//! through the Gate.

use std::sync::Arc;
use std::time::Duration;

use reelgate::core::{ManualClock, SystemClock};
use reelgate::delivery::MemoryMessenger;
use reelgate::store::{ContentStore, GrantStore, MemoryGrantStore, SqliteCatalog};
use reelgate::{
    ActionTag, CatalogIngest, ChatId, Gate, GateConfig, GateError, NewTitle, OwnerId,
};
use reelgate_testkit::{init_tracing, T0};

#[tokio::test(start_paused = true)]
async fn test_ingested_title_is_deliverable() -> anyhow::Result<()> {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let catalog = Arc::new(SqliteCatalog::open(dir.path().join("catalog.db"))?);
    let clock = Arc::new(ManualClock::new(T0));

    let ingest = CatalogIngest::new(catalog.clone(), clock.clone());
    let record = ingest
        .register(
            NewTitle::new("Paper Moons", "https://drive.example/pm", "gdrive")?
                .with_description("Two kids and a kite.")
                .with_year(2004)
                .with_genre("Family"),
        )
        .await?;
    assert_eq!(record.content_ref.as_str().len(), 16);

    let messenger = Arc::new(MemoryMessenger::new());
    let gate = Gate::new(
        GateConfig::default(),
        Arc::new(MemoryGrantStore::new()),
        catalog.clone(),
        messenger.clone(),
        clock,
    )?;

    let link = format!("https://modijiurl.com/{}", record.content_ref);
    let issued = gate.issue_grant(OwnerId(5), &link).await?;
    assert!(issued.announcement().contains("📝 Two kids and a kite."));
    assert!(issued.announcement().contains("📅 Year: 2004"));

    let delivery = gate
        .perform_action(OwnerId(5), ChatId(5), None, &issued.action(ActionTag::Download))
        .await?;
    assert_eq!(delivery.content_ref, record.content_ref);
    Ok(())
}

#[tokio::test]
async fn test_catalog_survives_reopen() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("catalog.db");

    let record = {
        let catalog = Arc::new(SqliteCatalog::open(&path)?);
        let ingest = CatalogIngest::new(catalog, Arc::new(SystemClock));
        ingest
            .register(NewTitle::new("Static", "mega://file", "mega")?)
            .await?
    };

    let catalog = SqliteCatalog::open(&path)?;
    assert_eq!(catalog.lookup(&record.content_ref).await?, Some(record));
    Ok(())
}

#[test]
fn test_unsupported_platform_rejected() {
    let err = NewTitle::new("Static", "ftp://file", "ftp").unwrap_err();
    assert!(matches!(err, GateError::Invalid(_)));
}

#[tokio::test(start_paused = true)]
async fn test_configured_sweeper_purges_expired_grants() -> anyhow::Result<()> {
    let grants = Arc::new(MemoryGrantStore::new());
    let clock = Arc::new(ManualClock::new(T0));
    let fixture = reelgate_testkit::TestFixture::new();

    let config = GateConfig::from_json_str(r#"{"grant_ttl_secs": 60, "sweep_interval_secs": 30}"#)?;
    let gate = Gate::new(
        config,
        grants.clone(),
        fixture.catalog.clone(),
        fixture.messenger.clone(),
        clock.clone(),
    )?;

    gate.issue_grant(OwnerId(1), &reelgate_testkit::link_for(fixture.movie()))
        .await?;
    assert_eq!(grants.len().await?, 1);

    let (tx, rx) = tokio::sync::watch::channel(false);
    let handle = gate
        .start_sweeper(rx)
        .ok_or_else(|| anyhow::anyhow!("sweeper not started"))?;

    clock.advance(Duration::from_secs(61));
    tokio::time::sleep(Duration::from_secs(31)).await;
    assert_eq!(grants.len().await?, 0);

    tx.send(true)?;
    handle.await?;
    Ok(())
}
