//! Access validation.

use std::sync::Arc;

use reelgate_core::{AccessGrant, AccessToken, ActionTag, Clock, Denial, OwnerId};
use reelgate_store::GrantStore;

use crate::error::Result;

/// Outcome of checking a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The token is the owner's live token.
    Granted(AccessGrant),
    /// The request is refused.
    Denied(Denial),
}

impl Verdict {
    pub fn is_granted(&self) -> bool {
        matches!(self, Verdict::Granted(_))
    }
}

/// Checks presented tokens against the grant table.
pub struct AccessValidator {
    grants: Arc<dyn GrantStore>,
    clock: Arc<dyn Clock>,
}

impl AccessValidator {
    pub fn new(grants: Arc<dyn GrantStore>, clock: Arc<dyn Clock>) -> Self {
        Self { grants, clock }
    }

    /// Validate `token` for `owner`.
    ///
    /// Any action tag is allowed under a live grant; the tag is only recorded.
    /// A grant is never consumed here: the same token validates again until
    /// it expires or is superseded.
    pub async fn validate(
        &self,
        owner: OwnerId,
        token: &AccessToken,
        action: ActionTag,
    ) -> Result<Verdict> {
        let now = self.clock.now_millis();

        let grant = match self.grants.get(owner).await? {
            Some(grant) => grant,
            None => return Ok(self.deny(owner, action, Denial::NoGrant)),
        };

        if grant.is_expired(now) {
            // Only evicts if the grant currently held is still the expired one.
            self.grants.invalidate_if_expired(owner, now).await?;
            return Ok(self.deny(owner, action, Denial::Expired));
        }

        if !grant.token.matches(token) {
            return Ok(self.deny(owner, action, Denial::TokenMismatch));
        }

        tracing::debug!(
            owner = %owner,
            action = %action,
            content_ref = %grant.content_ref,
            remaining_secs = grant.remaining(now).as_secs(),
            "access granted"
        );
        Ok(Verdict::Granted(grant))
    }

    fn deny(&self, owner: OwnerId, action: ActionTag, reason: Denial) -> Verdict {
        tracing::debug!(owner = %owner, action = %action, reason = %reason, "access denied");
        Verdict::Denied(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use reelgate_core::{ContentRef, ManualClock};
    use reelgate_store::MemoryGrantStore;

    use crate::issuer::TokenIssuer;

    const T0: i64 = 1_700_000_000_000;

    struct Harness {
        issuer: TokenIssuer,
        validator: AccessValidator,
        store: Arc<MemoryGrantStore>,
        clock: Arc<ManualClock>,
    }

    fn harness() -> Harness {
        let store = Arc::new(MemoryGrantStore::new());
        let clock = Arc::new(ManualClock::new(T0));
        Harness {
            issuer: TokenIssuer::new(store.clone(), clock.clone()),
            validator: AccessValidator::new(store.clone(), clock.clone()),
            store,
            clock,
        }
    }

    fn movie() -> ContentRef {
        ContentRef::parse("b7e2a0c4f19d3e58").unwrap()
    }

    #[tokio::test]
    async fn test_no_grant() {
        let h = harness();
        let verdict = h
            .validator
            .validate(OwnerId(1), &AccessToken::generate(), ActionTag::Download)
            .await
            .unwrap();
        assert_eq!(verdict, Verdict::Denied(Denial::NoGrant));
    }

    #[tokio::test]
    async fn test_accept_just_before_expiry_deny_at_expiry() {
        let h = harness();
        let grant = h.issuer.issue(OwnerId(1), movie()).await.unwrap();

        h.clock.set(T0 + 1_799_000);
        let verdict = h
            .validator
            .validate(OwnerId(1), &grant.token, ActionTag::Stream)
            .await
            .unwrap();
        assert!(verdict.is_granted());

        h.clock.set(T0 + 1_800_000);
        let verdict = h
            .validator
            .validate(OwnerId(1), &grant.token, ActionTag::Stream)
            .await
            .unwrap();
        assert_eq!(verdict, Verdict::Denied(Denial::Expired));

        // Lazily evicted on first observation.
        assert!(h.store.get(OwnerId(1)).await.unwrap().is_none());
        let verdict = h
            .validator
            .validate(OwnerId(1), &grant.token, ActionTag::Stream)
            .await
            .unwrap();
        assert_eq!(verdict, Verdict::Denied(Denial::NoGrant));
    }

    #[tokio::test]
    async fn test_expiry_checked_before_token() {
        let h = harness();
        h.issuer.issue(OwnerId(1), movie()).await.unwrap();
        h.clock.advance(Duration::from_secs(3600));

        let verdict = h
            .validator
            .validate(OwnerId(1), &AccessToken::generate(), ActionTag::Download)
            .await
            .unwrap();
        assert_eq!(verdict, Verdict::Denied(Denial::Expired));
    }

    #[tokio::test]
    async fn test_superseded_token_is_dead() {
        let h = harness();
        let a = h.issuer.issue(OwnerId(1), movie()).await.unwrap();
        h.clock.advance(Duration::from_secs(30));
        let b = h.issuer.issue(OwnerId(1), movie()).await.unwrap();

        let old = h
            .validator
            .validate(OwnerId(1), &a.token, ActionTag::Download)
            .await
            .unwrap();
        assert_eq!(old, Verdict::Denied(Denial::TokenMismatch));

        let new = h
            .validator
            .validate(OwnerId(1), &b.token, ActionTag::Download)
            .await
            .unwrap();
        assert_eq!(new, Verdict::Granted(b));
    }

    #[tokio::test]
    async fn test_token_is_reusable_for_both_actions() {
        let h = harness();
        let grant = h.issuer.issue(OwnerId(9), movie()).await.unwrap();

        for action in [ActionTag::Download, ActionTag::Stream, ActionTag::Download] {
            let verdict = h
                .validator
                .validate(OwnerId(9), &grant.token, action)
                .await
                .unwrap();
            assert!(verdict.is_granted());
        }
    }

    #[tokio::test]
    async fn test_token_bound_to_owner() {
        let h = harness();
        let grant = h.issuer.issue(OwnerId(1), movie()).await.unwrap();
        h.issuer.issue(OwnerId(2), movie()).await.unwrap();

        let verdict = h
            .validator
            .validate(OwnerId(2), &grant.token, ActionTag::Stream)
            .await
            .unwrap();
        assert_eq!(verdict, Verdict::Denied(Denial::TokenMismatch));
    }
}
