//! Error types for Reelgate Core.

use thiserror::Error;

/// Errors raised while decoding or building core values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid access token encoding: {0}")]
    InvalidToken(String),

    #[error("unknown action tag: {0:?}")]
    UnknownActionTag(String),

    #[error("malformed action request: {0}")]
    MalformedAction(String),

    #[error("unsupported source platform: {0:?}")]
    UnsupportedPlatform(String),

    #[error("invalid content reference: {0:?}")]
    InvalidContentRef(String),
}
