//! Access tokens.
//!
//! A token is [`TOKEN_BYTES`] bytes drawn from the thread-local CSPRNG and
//! encoded as unpadded URL-safe base64 (43 characters). The encoded form is
//! what travels inside action strings.

use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::error::CoreError;

/// Number of random bytes behind every token.
pub const TOKEN_BYTES: usize = 32;

/// Length of the encoded token.
pub const ENCODED_LEN: usize = 43;

/// An unguessable bearer token bound to one grant.
#[derive(Clone, Serialize, Deserialize)]
pub struct AccessToken([u8; TOKEN_BYTES]);

impl AccessToken {
    /// Generate a fresh random token.
    pub fn generate() -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; TOKEN_BYTES]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; TOKEN_BYTES] {
        &self.0
    }

    /// Encode for the wire.
    pub fn encode(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.0)
    }

    /// Decode a wire token.
    pub fn decode(s: &str) -> Result<Self, CoreError> {
        if s.len() != ENCODED_LEN {
            return Err(CoreError::InvalidToken(format!(
                "expected {} characters, got {}",
                ENCODED_LEN,
                s.len()
            )));
        }
        let bytes = URL_SAFE_NO_PAD
            .decode(s)
            .map_err(|e| CoreError::InvalidToken(e.to_string()))?;
        let arr: [u8; TOKEN_BYTES] = bytes
            .try_into()
            .map_err(|_| CoreError::InvalidToken("wrong decoded length".into()))?;
        Ok(Self(arr))
    }

    /// Constant-time comparison.
    pub fn matches(&self, other: &AccessToken) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl PartialEq for AccessToken {
    fn eq(&self, other: &Self) -> bool {
        self.matches(other)
    }
}

impl Eq for AccessToken {}

// Never print the secret itself.
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessToken({}…)", &self.encode()[..6])
    }
}
