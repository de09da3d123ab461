//! Reasons an action request is refused.
//!
//! Denials are ordinary outcomes, not faults: they are shown to the user and
//! never logged as errors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why an action was not authorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Denial {
    /// The owner holds no grant.
    NoGrant,
    /// The owner's grant reached its expiry instant.
    Expired,
    /// The presented token is not the owner's current token.
    TokenMismatch,
    /// The action string could not be parsed.
    MalformedAction,
}

impl Denial {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Denial::NoGrant => "NO_GRANT",
            Denial::Expired => "EXPIRED",
            Denial::TokenMismatch => "TOKEN_MISMATCH",
            Denial::MalformedAction => "MALFORMED_ACTION",
        }
    }

    /// Text shown to the requester.
    pub fn user_message(&self) -> &'static str {
        match self {
            Denial::NoGrant => "Please verify the URL first!",
            Denial::Expired => "Access token expired! Please verify again.",
            Denial::TokenMismatch | Denial::MalformedAction => "Invalid access token!",
        }
    }
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(Denial::NoGrant.to_string(), "NO_GRANT");
        assert_eq!(Denial::Expired.to_string(), "EXPIRED");
        assert_eq!(Denial::TokenMismatch.to_string(), "TOKEN_MISMATCH");
    }

    #[test]
    fn test_serde_matches_code() {
        let json = serde_json::to_string(&Denial::TokenMismatch).unwrap();
        assert_eq!(json, "\"TOKEN_MISMATCH\"");
    }
}
