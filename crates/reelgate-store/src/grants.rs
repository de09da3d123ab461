//! The grant table.
//!
//! Maps each owner to at most one [`AccessGrant`]. This is the only place
//! grant state is mutated. Callers never see the underlying map.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use reelgate_core::{AccessGrant, OwnerId};

use crate::error::{Result, StoreError};

/// Async interface over the grant table.
///
/// Every method must be atomic with respect to every other method on the
/// same store.
#[async_trait]
pub trait GrantStore: Send + Sync {
    /// Store `grant` for its owner, replacing any existing grant.
    ///
    /// Returns the grant that was superseded, if any.
    async fn put(&self, grant: AccessGrant) -> Result<Option<AccessGrant>>;

    /// Get the owner's current grant.
    async fn get(&self, owner: OwnerId) -> Result<Option<AccessGrant>>;

    /// Remove the owner's grant if it has expired at `now`.
    ///
    /// Returns the grant only if it is still live; an expired grant is
    /// evicted and `None` is returned.
    async fn invalidate_if_expired(&self, owner: OwnerId, now: i64)
        -> Result<Option<AccessGrant>>;

    /// Evict every grant expired at `now`. Returns how many were removed.
    async fn purge_expired(&self, now: i64) -> Result<usize>;

    /// Number of grants currently held, live or not.
    async fn len(&self) -> Result<usize>;
}

/// In-memory grant table behind a single `RwLock`.
#[derive(Default)]
pub struct MemoryGrantStore {
    grants: RwLock<HashMap<OwnerId, AccessGrant>>,
}

impl MemoryGrantStore {
    /// Create an empty grant table.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<OwnerId, AccessGrant>>> {
        self.grants
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<OwnerId, AccessGrant>>> {
        self.grants
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }
}

#[async_trait]
impl GrantStore for MemoryGrantStore {
    async fn put(&self, grant: AccessGrant) -> Result<Option<AccessGrant>> {
        let mut grants = self.write()?;
        Ok(grants.insert(grant.owner_id, grant))
    }

    async fn get(&self, owner: OwnerId) -> Result<Option<AccessGrant>> {
        let grants = self.read()?;
        Ok(grants.get(&owner).cloned())
    }

    async fn invalidate_if_expired(
        &self,
        owner: OwnerId,
        now: i64,
    ) -> Result<Option<AccessGrant>> {
        let mut grants = self.write()?;

        match grants.get(&owner) {
            Some(grant) if grant.is_expired(now) => {
                grants.remove(&owner);
                Ok(None)
            }
            Some(grant) => Ok(Some(grant.clone())),
            None => Ok(None),
        }
    }

    async fn purge_expired(&self, now: i64) -> Result<usize> {
        let mut grants = self.write()?;
        let before = grants.len();
        grants.retain(|_, grant| !grant.is_expired(now));
        Ok(before - grants.len())
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }
}
