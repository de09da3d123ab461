//! # Reelgate Core
//!
//! Pure primitives for Reelgate: identifiers, access tokens, grants and the
//! action-request wire format.
//!
//! This crate contains no I/O, no storage, no timers. Everything here is plain
//! data plus the rules that decide whether a grant still holds.
//!
//! ## Key Types
//!
//! - [`AccessGrant`] - The binding of one owner to one content reference and token
//! - [`AccessToken`] - 32 bytes of CSPRNG output, URL-safe encoded
//! - [`ActionRequest`] - A parsed `"<tag>_<token>"` action string
//! - [`ContentRecord`] - Media metadata as resolved from the catalog
//! - [`Denial`] - Why an action was refused
//!
//! ## Time
//!
//! All instants are Unix milliseconds (`i64`). The [`Clock`] trait supplies
//! "now" so that expiry can be tested without waiting.

pub mod action;
pub mod clock;
pub mod content;
pub mod denial;
pub mod error;
pub mod grant;
pub mod token;
pub mod types;

pub use action::{ActionRequest, ActionTag, MediaKind};
pub use clock::{duration_millis, Clock, ManualClock, SystemClock};
pub use content::{ContentRecord, SourcePlatform};
pub use denial::Denial;
pub use error::CoreError;
pub use grant::{AccessGrant, DEFAULT_GRANT_TTL};
pub use token::{AccessToken, TOKEN_BYTES};
pub use types::{ChatId, ContentRef, MessageId, OwnerId};
