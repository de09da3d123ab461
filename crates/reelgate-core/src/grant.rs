//! Access grants.
//!
//! A grant binds one owner to one content reference through a token, until a
//! fixed expiry instant. Grants are not consumed by use: the same token may
//! authorize any number of actions while it is live.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::clock::duration_millis;
use crate::token::AccessToken;
use crate::types::{ContentRef, OwnerId};

/// Default grant lifetime (30 minutes).
pub const DEFAULT_GRANT_TTL: Duration = Duration::from_secs(30 * 60);

/// The binding of a user to a content reference and a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGrant {
    /// Who may use the token.
    pub owner_id: OwnerId,

    /// The bearer secret.
    pub token: AccessToken,

    /// What the token unlocks.
    pub content_ref: ContentRef,

    /// When the grant was issued (Unix ms).
    pub issued_at: i64,

    /// First instant at which the grant no longer holds (Unix ms).
    pub expires_at: i64,
}

impl AccessGrant {
    /// Build a grant issued at `now` that lives for `ttl`.
    pub fn new(
        owner_id: OwnerId,
        token: AccessToken,
        content_ref: ContentRef,
        now: i64,
        ttl: Duration,
    ) -> Self {
        Self {
            owner_id,
            token,
            content_ref,
            issued_at: now,
            expires_at: now.saturating_add(duration_millis(ttl)),
        }
    }

    /// Whether the grant has expired at `now`.
    ///
    /// The boundary belongs to expiry: at `now == expires_at` the grant is dead.
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }

    /// Time left before expiry, zero once expired.
    pub fn remaining(&self, now: i64) -> Duration {
        let left = self.expires_at.saturating_sub(now).max(0);
        Duration::from_millis(left as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grant_at(now: i64) -> AccessGrant {
        AccessGrant::new(
            OwnerId(7),
            AccessToken::from_bytes([1u8; 32]),
            ContentRef::parse("abc123").unwrap(),
            now,
            DEFAULT_GRANT_TTL,
        )
    }

    #[test]
    fn test_expiry_is_issue_plus_ttl() {
        let grant = grant_at(1_000);
        assert_eq!(grant.expires_at, 1_000 + 1_800_000);
    }

    #[test]
    fn test_expiry_boundary_is_closed() {
        let grant = grant_at(0);
        assert!(!grant.is_expired(1_799_999));
        assert!(grant.is_expired(1_800_000));
        assert!(grant.is_expired(1_800_001));
    }

    #[test]
    fn test_remaining() {
        let grant = grant_at(0);
        assert_eq!(grant.remaining(0), DEFAULT_GRANT_TTL);
        assert_eq!(grant.remaining(1_799_000), Duration::from_secs(1));
        assert_eq!(grant.remaining(5_000_000), Duration::ZERO);
    }
}
