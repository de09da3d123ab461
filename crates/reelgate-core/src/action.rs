//! Action requests.
//!
//! An action request arrives from the outer routing layer as a single string
//! `"<tag>_<token>"`. The token alphabet itself contains `_`, so the string is
//! split at the first underscore only.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::token::AccessToken;

/// What the user asked to do with the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionTag {
    /// Receive the media as a document.
    Download,
    /// Receive the media as playable video.
    Stream,
}

impl ActionTag {
    /// Both tags, in button order.
    pub const ALL: [ActionTag; 2] = [ActionTag::Download, ActionTag::Stream];

    /// Wire prefix.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionTag::Download => "dl",
            ActionTag::Stream => "str",
        }
    }

    /// Button label shown next to the action.
    pub fn label(&self) -> &'static str {
        match self {
            ActionTag::Download => "📥 Download",
            ActionTag::Stream => "▶️ Stream",
        }
    }

    /// How the transport should send the media for this action.
    pub fn media_kind(&self) -> MediaKind {
        match self {
            ActionTag::Download => MediaKind::Document,
            ActionTag::Stream => MediaKind::Video,
        }
    }
}

impl FromStr for ActionTag {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dl" => Ok(ActionTag::Download),
            "str" => Ok(ActionTag::Stream),
            other => Err(CoreError::UnknownActionTag(other.to_string())),
        }
    }
}

impl fmt::Display for ActionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How media is presented by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    Document,
    Video,
}

/// A parsed action string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    pub tag: ActionTag,
    pub token: AccessToken,
}

impl ActionRequest {
    /// Create a request.
    pub fn new(tag: ActionTag, token: AccessToken) -> Self {
        Self { tag, token }
    }

    /// Parse `"<tag>_<token>"`.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let (tag, token) = s
            .split_once('_')
            .ok_or_else(|| CoreError::MalformedAction("missing tag separator".into()))?;
        let tag = tag
            .parse::<ActionTag>()
            .map_err(|e| CoreError::MalformedAction(e.to_string()))?;
        let token =
            AccessToken::decode(token).map_err(|e| CoreError::MalformedAction(e.to_string()))?;
        Ok(Self { tag, token })
    }

    /// Encode to the wire form.
    pub fn encode(&self) -> String {
        format!("{}_{}", self.tag.as_str(), self.token.encode())
    }
}

impl FromStr for ActionRequest {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
