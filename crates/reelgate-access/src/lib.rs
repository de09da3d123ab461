//! # Reelgate Access
//!
//! Issuing and checking access grants.
//!
//! ## Overview
//!
//! - [`TokenIssuer`] mints a fresh token for an owner and binds it to a content
//!   reference for a fixed TTL, superseding whatever the owner held before.
//! - [`AccessValidator`] decides whether a presented token currently unlocks
//!   anything for its owner.
//!
//! ## Validation Order
//!
//! ```text
//! get(owner) ── absent ──────────────> Denied(NO_GRANT)
//!     │
//!     ├── now >= expires_at ─ evict ─> Denied(EXPIRED)
//!     │
//!     ├── token != grant.token ──────> Denied(TOKEN_MISMATCH)
//!     │
//!     └──────────────────────────────> Granted(content_ref)
//! ```
//!
//! Expiry is checked before token equality, so an expired grant never reveals
//! whether the presented token was right.

pub mod error;
pub mod issuer;
pub mod validator;

pub use error::{AccessError, Result};
pub use issuer::TokenIssuer;
pub use validator::{AccessValidator, Verdict};
