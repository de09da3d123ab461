//! Error types for the facade.

use reelgate_core::{ContentRef, Denial};
use reelgate_delivery::{DeliveryError, TransportError};
use thiserror::Error;

/// Invalid gate configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A duration that must be positive is zero.
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    /// No shortener domains were configured.
    #[error("at least one shortener domain is required")]
    NoShortenerDomains,

    /// A configured domain is not a bare host name.
    #[error("invalid shortener domain: {0:?}")]
    InvalidDomain(String),

    /// The removal notice text is empty.
    #[error("removal notice must not be empty")]
    EmptyRemovalNotice,

    /// The configuration could not be parsed.
    #[error("config parse error: {0}")]
    Parse(String),
}

/// Errors that can occur during gate operations.
#[derive(Debug, Error)]
pub enum GateError {
    /// The action was refused.
    #[error("access denied: {0}")]
    Denied(Denial),

    /// The input is not a URL at all.
    #[error("not a link")]
    NotALink,

    /// The link is not a recognised shortened link or points nowhere.
    #[error("invalid link: {0}")]
    InvalidLink(String),

    /// The referenced content is not in the catalog.
    #[error("content not found: {0}")]
    ContentNotFound(ContentRef),

    /// A title with this reference is already registered.
    #[error("content already registered: {0}")]
    DuplicateContent(ContentRef),

    /// The messaging platform failed.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] reelgate_store::StoreError),

    /// Access error.
    #[error("access error: {0}")]
    Access(#[from] reelgate_access::AccessError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid input data.
    #[error("invalid input: {0}")]
    Invalid(#[from] reelgate_core::CoreError),
}

impl GateError {
    /// Text to show the requester, if this error is theirs to see.
    pub fn user_message(&self) -> &'static str {
        match self {
            GateError::Denied(reason) => reason.user_message(),
            GateError::NotALink => "Please send a verified shortened URL from the main bot.",
            GateError::InvalidLink(_) => {
                "❌ Invalid or expired URL.\nPlease get a new link from the main bot."
            }
            GateError::ContentNotFound(_) => "Movie not found!",
            _ => "An error occurred. Please try again later.",
        }
    }

    /// Whether the caller did something wrong, as opposed to a fault here.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            GateError::Denied(_)
                | GateError::NotALink
                | GateError::InvalidLink(_)
                | GateError::ContentNotFound(_)
                | GateError::Invalid(_)
        )
    }
}

impl From<DeliveryError> for GateError {
    fn from(e: DeliveryError) -> Self {
        match e {
            DeliveryError::Denied(reason) => GateError::Denied(reason),
            DeliveryError::ContentNotFound(content_ref) => GateError::ContentNotFound(content_ref),
            DeliveryError::Transport(e) => GateError::Transport(e),
            DeliveryError::Access(e) => GateError::Access(e),
            DeliveryError::Store(e) => GateError::Store(e),
        }
    }
}

/// Result type for gate operations.
pub type Result<T> = std::result::Result<T, GateError>;
