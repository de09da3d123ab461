//! # Reelgate Delivery
//!
//! Sending protected media and making it disappear again.
//!
//! ## Overview
//!
//! - [`MessagingTransport`] - the narrow seam to the chat platform
//! - [`DeferredActionScheduler`] - one-shot delayed deletions, run detached
//! - [`ContentDeliveryGate`] - validate, restrict, send, schedule expiry
//!
//! ## Delivery Flow
//!
//! ```text
//! Requested ── validate ──> Validated ── restrict (best effort) ──> Restricted
//!     │                                                                │
//!     └── denied: stop                                     send protected media
//!                                                                      │
//!                       ScheduledForExpiry <── schedule delete ── Delivered
//! ```
//!
//! A failed restrict is logged and the flow continues. A failed send aborts
//! the attempt before anything is scheduled.
//!
//! ## Expiry Chain
//!
//! ```text
//! t+30m  delete_content        delete media, post removal notice
//! t+30m+10s  delete_notification   delete the removal notice
//! ```
//!
//! Deletions tolerate the target already being gone; a second firing for the
//! same message is a logged no-op.

pub mod error;
pub mod gate;
pub mod scheduler;
pub mod transport;

pub use error::{DeliveryError, Result, TransportError};
pub use gate::{ContentDeliveryGate, Delivery, DeliveryRequest, DeliveryStage};
pub use scheduler::{
    DeferredAction, DeferredActionKind, DeferredActionScheduler, FireOutcome, SchedulerConfig,
    DEFAULT_CONTENT_TTL, DEFAULT_NOTICE_DELAY, DEFAULT_REMOVAL_NOTICE,
};
pub use transport::{
    memory::MemoryMessenger, memory::SentBody, memory::SentMessage, DeleteOutcome,
    MessagingTransport, OutboundMedia,
};
