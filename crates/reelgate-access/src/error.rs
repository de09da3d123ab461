//! Error types for the access module.

use thiserror::Error;

/// Faults while issuing or validating grants.
///
/// Denials are not errors; see [`crate::Verdict`].
#[derive(Debug, Error)]
pub enum AccessError {
    /// Grant table failure.
    #[error("store error: {0}")]
    Store(#[from] reelgate_store::StoreError),
}

/// Result type for access operations.
pub type Result<T> = std::result::Result<T, AccessError>;
