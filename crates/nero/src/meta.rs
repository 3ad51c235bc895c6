//! # Media Metadata
//!
//! Every stored asset may carry one metadata record describing where it came from. The set
//! of shapes is closed: adding a shape means adding a variant (and a [`MetadataKind`]), never
//! composing records at runtime.
//!
//! ## Serialization
//!
//! Metadata is internally tagged with a `type` discriminator so index lines and API payloads
//! stay self-describing:
//!
//! ```text
//! {"type":"generic","source":"https://…","artist":"someone"}
//! {"type":"anime","name":"Frieren"}
//! ```
//!
//! Absent optional fields are omitted on write and tolerated on read.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Metadata {
    Generic {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        artist: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        artist_link: Option<String>,
    },
    Anime {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

/// The discriminator of a [`Metadata`] value, also used as a listing category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataKind {
    Generic,
    Anime,
}

impl Metadata {
    pub fn generic(
        source: Option<String>,
        artist: Option<String>,
        artist_link: Option<String>,
    ) -> Self {
        Metadata::Generic {
            source,
            artist,
            artist_link,
        }
    }

    pub fn anime(name: Option<String>) -> Self {
        Metadata::Anime { name }
    }

    pub fn kind(&self) -> MetadataKind {
        match self {
            Metadata::Generic { .. } => MetadataKind::Generic,
            Metadata::Anime { .. } => MetadataKind::Anime,
        }
    }
}

impl MetadataKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataKind::Generic => "generic",
            MetadataKind::Anime => "anime",
        }
    }
}

impl fmt::Display for MetadataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetadataKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "generic" => Ok(MetadataKind::Generic),
            "anime" => Ok(MetadataKind::Anime),
            _ => Err(format!("unknown metadata category: {}", s)),
        }
    }
}
