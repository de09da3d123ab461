//! Content metadata as held by the catalog.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::ContentRef;

/// Where a media file is hosted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourcePlatform {
    Gdrive,
    Mega,
    Direct,
}

impl SourcePlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourcePlatform::Gdrive => "gdrive",
            SourcePlatform::Mega => "mega",
            SourcePlatform::Direct => "direct",
        }
    }
}

impl FromStr for SourcePlatform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gdrive" => Ok(SourcePlatform::Gdrive),
            "mega" => Ok(SourcePlatform::Mega),
            "direct" => Ok(SourcePlatform::Direct),
            other => Err(CoreError::UnsupportedPlatform(other.to_string())),
        }
    }
}

impl fmt::Display for SourcePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub content_ref: ContentRef,
    pub title: String,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub genre: Option<String>,
    /// Where the transport fetches the media from (URL or file id).
    pub media_locator: String,
}

impl ContentRecord {
    /// Caption attached to delivered media.
    pub fn caption(&self) -> String {
        format!("🎥 {}", self.title)
    }

    /// Multi-line summary shown after a link verifies.
    pub fn summary(&self) -> String {
        let year = self
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        format!(
            "🎥 *{}*\n📝 {}\n📅 Year: {}\n🎭 Genre: {}",
            self.title,
            self.description
                .as_deref()
                .unwrap_or("No description available"),
            year,
            self.genre.as_deref().unwrap_or("N/A"),
        )
    }
}
