//! Token issuance.

use std::sync::Arc;
use std::time::Duration;

use reelgate_core::{AccessGrant, AccessToken, Clock, ContentRef, OwnerId, DEFAULT_GRANT_TTL};
use reelgate_store::GrantStore;

use crate::error::Result;

/// Mints grants into the grant table.
pub struct TokenIssuer {
    grants: Arc<dyn GrantStore>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl TokenIssuer {
    /// Create an issuer with the default 30 minute TTL.
    pub fn new(grants: Arc<dyn GrantStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            grants,
            clock,
            ttl: DEFAULT_GRANT_TTL,
        }
    }

    /// Override the grant lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a grant for `owner` on an already-resolved `content_ref`.
    ///
    /// Any grant the owner held before is replaced and its token stops
    /// resolving immediately.
    pub async fn issue(&self, owner: OwnerId, content_ref: ContentRef) -> Result<AccessGrant> {
        let now = self.clock.now_millis();
        let grant = AccessGrant::new(owner, AccessToken::generate(), content_ref, now, self.ttl);

        if let Some(previous) = self.grants.put(grant.clone()).await? {
            tracing::debug!(
                owner = %owner,
                previous_content = %previous.content_ref,
                "superseded existing grant"
            );
        }

        tracing::info!(
            owner = %owner,
            content_ref = %grant.content_ref,
            expires_at = grant.expires_at,
            "issued access grant"
        );
        Ok(grant)
    }
}
