//! Expired-grant sweeper.
//!
//! Background task that periodically evicts grants past their expiry.

use std::sync::Arc;
use std::time::Duration;

use reelgate_core::Clock;
use reelgate_store::GrantStore;

/// Run the sweep loop.
///
/// Stops when a shutdown signal is received or the sender is dropped.
pub async fn grant_sweep_loop(
    grants: Arc<dyn GrantStore>,
    clock: Arc<dyn Clock>,
    interval: Duration,
    mut shutdown: tokio::sync::watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            changed = shutdown.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }

        if *shutdown.borrow() {
            break;
        }

        match grants.purge_expired(clock.now_millis()).await {
            Ok(0) => {}
            Ok(removed) => tracing::debug!(removed, "swept expired grants"),
            Err(e) => tracing::warn!(error = %e, "grant sweep failed"),
        }
    }

    tracing::debug!("grant sweeper stopped");
}

/// Spawn [`grant_sweep_loop`] on the current runtime.
pub fn spawn_sweeper(
    grants: Arc<dyn GrantStore>,
    clock: Arc<dyn Clock>,
    interval: Duration,
    shutdown: tokio::sync::watch::Receiver<bool>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(grant_sweep_loop(grants, clock, interval, shutdown))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelgate_core::{AccessGrant, AccessToken, ContentRef, ManualClock, OwnerId};
    use reelgate_store::MemoryGrantStore;

    fn grant(owner: i64, now: i64) -> AccessGrant {
        AccessGrant::new(
            OwnerId(owner),
            AccessToken::generate(),
            ContentRef::parse("film").unwrap(),
            now,
            Duration::from_secs(60),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeps_only_expired() {
        let store = Arc::new(MemoryGrantStore::new());
        let clock = Arc::new(ManualClock::new(0));
        store.put(grant(1, 0)).await.unwrap();
        store.put(grant(2, 50_000)).await.unwrap();

        let (tx, rx) = tokio::sync::watch::channel(false);
        let handle = spawn_sweeper(store.clone(), clock.clone(), Duration::from_secs(5), rx);

        clock.set(60_000);
        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(store.len().await.unwrap(), 1);
        assert!(store.get(OwnerId(2)).await.unwrap().is_some());

        tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_when_sender_dropped() {
        let store = Arc::new(MemoryGrantStore::new());
        let clock = Arc::new(ManualClock::new(0));
        let (tx, rx) = tokio::sync::watch::channel(false);
        let handle = spawn_sweeper(store, clock, Duration::from_secs(1), rx);

        drop(tx);
        handle.await.unwrap();
    }
}
