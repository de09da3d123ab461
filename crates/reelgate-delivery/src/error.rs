//! Error types for the delivery module.

use thiserror::Error;

use reelgate_core::{ContentRef, Denial};

/// Failures reported by a messaging transport.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The platform refused the request.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The platform could not be reached.
    #[error("transport unavailable: {0}")]
    Unavailable(String),
}

/// Errors that end a delivery attempt.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The request was not authorized.
    #[error("access denied: {0}")]
    Denied(Denial),

    /// The grant points at content the catalog no longer has.
    #[error("content not found: {0}")]
    ContentNotFound(ContentRef),

    /// Sending the media failed; nothing was scheduled.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Access check failed for a non-denial reason.
    #[error("access error: {0}")]
    Access(#[from] reelgate_access::AccessError),

    /// Catalog failure.
    #[error("store error: {0}")]
    Store(#[from] reelgate_store::StoreError),
}

/// Result type for delivery operations.
pub type Result<T> = std::result::Result<T, DeliveryError>;
