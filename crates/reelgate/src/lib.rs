//! # Reelgate
//!
//! Time-boxed access to media behind verified links.
//!
//! ## Overview
//!
//! A user presents a shortened link. Reelgate verifies it, mints a random
//! access token bound to that user and the linked content, and hands back two
//! action strings (download and stream). Presenting either action within the
//! grant's lifetime delivers the media as a protected message, which deletes
//! itself after a fixed time and leaves a short-lived notice in its place.
//!
//! - **Grants**: one per user, 30 minutes, reusable, superseded by reissue
//! - **Actions**: `"dl_<token>"` or `"str_<token>"`
//! - **Delivery**: restrict forwarding (best effort), send protected, schedule deletion
//! - **Ingest**: register titles into the catalog under derived references
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use reelgate::{Gate, GateConfig};
//! use reelgate::core::{ActionTag, ChatId, OwnerId, SystemClock};
//! use reelgate::delivery::MemoryMessenger;
//! use reelgate::store::{MemoryGrantStore, SqliteCatalog};
//!
//! async fn example() -> reelgate::Result<()> {
//!     let gate = Gate::new(
//!         GateConfig::default(),
//!         Arc::new(MemoryGrantStore::new()),
//!         Arc::new(SqliteCatalog::open("catalog.db")?),
//!         Arc::new(MemoryMessenger::new()),
//!         Arc::new(SystemClock),
//!     )?;
//!
//!     let issued = gate
//!         .issue_grant(OwnerId(7), "https://get2short.com/3f9a0c12de45b678")
//!         .await?;
//!     let stream = issued.action(ActionTag::Stream);
//!
//!     gate.perform_action(OwnerId(7), ChatId(7), None, &stream).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `reelgate::core` - identifiers, tokens, grants, action parsing
//! - `reelgate::store` - grant table and content catalog
//! - `reelgate::access` - issuing and validating grants
//! - `reelgate::delivery` - transport, scheduler, delivery gate

pub mod config;
pub mod error;
pub mod gate;
pub mod ingest;
pub mod link;
pub mod sweeper;

// Re-export component crates
pub use reelgate_access as access;
pub use reelgate_core as core;
pub use reelgate_delivery as delivery;
pub use reelgate_store as store;

// Re-export main types for convenience
pub use config::GateConfig;
pub use error::{ConfigError, GateError, Result};
pub use gate::{Gate, IssuedGrant};
pub use ingest::{derive_content_ref, CatalogIngest, NewTitle};
pub use link::{LinkResolver, ShortLinkResolver};
pub use sweeper::{grant_sweep_loop, spawn_sweeper};

// Re-export commonly used types
pub use reelgate_core::{
    AccessGrant, AccessToken, ActionRequest, ActionTag, ChatId, ContentRecord, ContentRef,
    Denial, MessageId, OwnerId,
};
pub use reelgate_delivery::Delivery;
