use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Kind of media a catalog entry points to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    Gif,
    Unknown,
}

impl MediaType {
    /// Classify by file extension (without the dot)
    pub fn from_extension(extension: impl AsRef<str>) -> Self {
        match extension.as_ref().to_ascii_lowercase().as_str() {
            "mp4" => Self::Video,
            "png" | "jpg" => Self::Image,
            "gif" => Self::Gif,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Gif => "gif",
            Self::Unknown => "unknown",
        }
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
