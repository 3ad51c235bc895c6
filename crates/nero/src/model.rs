//! # Domain Model: Media Entities
//!
//! A [`Media`] is one stored asset: its identifier, a coarse [`Format`] classification, the
//! absolute path of the asset file and optional [`Metadata`].
//!
//! ## Immutability
//!
//! Entities are built once (by `Repository::create` or by the caller of `Repository::add`)
//! and never change afterwards. The repository hands out clones, so mutating a returned
//! value never touches the stored copy.
//!
//! ## Format Classification
//!
//! The format is derived from the detected MIME type exactly once, at creation:
//!
//! | MIME type | Format |
//! |-----------|--------|
//! | `image/jpeg`, `image/png` | [`Format::Image`] |
//! | `image/vnd.mozilla.apng`, `image/gif`, `image/webp` | [`Format::AnimatedImage`] |
//! | anything else | [`Format::Unknown`] |
//!
//! ## Paths
//!
//! In memory `path` is always absolute. The index log stores it relative to the repository
//! root where possible (see [`crate::store::index`]).

use crate::meta::Metadata;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    #[default]
    Unknown,
    Image,
    AnimatedImage,
}

impl Format {
    pub fn from_mime(mime: &str) -> Self {
        match mime {
            "image/jpeg" | "image/png" => Format::Image,
            "image/vnd.mozilla.apng" | "image/gif" | "image/webp" => Format::AnimatedImage,
            _ => Format::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Unknown => "unknown",
            Format::Image => "image",
            Format::AnimatedImage => "animated_image",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub id: Uuid,
    #[serde(default)]
    pub format: Format,
    pub path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Metadata>,
}

impl Media {
    pub fn new(id: Uuid, format: Format, path: PathBuf, meta: Option<Metadata>) -> Self {
        Self {
            id,
            format,
            path,
            meta,
        }
    }
}
