//! Strong type definitions for Reelgate.
//!
//! All identifiers are newtypes so that an owner id is never passed where a
//! chat id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// The user an access grant belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OwnerId(pub i64);

/// A conversation the transport can post into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChatId(pub i64);

/// A message handle, unique within its chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageId(pub i64);

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque key identifying media metadata in the catalog.
///
/// References travel as the last path segment of a shortened link, so they
/// are restricted to a URL-path-safe alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContentRef(String);

impl ContentRef {
    /// Maximum accepted length.
    pub const MAX_LEN: usize = 128;

    /// Parse a content reference, rejecting empty or non path-safe input.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let valid = !s.is_empty()
            && s.len() <= Self::MAX_LEN
            && s
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b'.');
        if !valid {
            return Err(CoreError::InvalidContentRef(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    /// Build a reference from raw digest bytes, as lowercase hex.
    ///
    /// Bytes past `MAX_LEN / 2` are ignored.
    pub fn from_digest(digest: &[u8]) -> Self {
        let len = digest.len().min(Self::MAX_LEN / 2);
        Self(hex::encode(&digest[..len]))
    }

    /// Get the reference as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for ContentRef {
    type Error = CoreError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}
