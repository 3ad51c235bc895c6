//! # Configuration
//!
//! Nero configuration is loaded with [`confique`] from a TOML file, with environment
//! variables layered on top and compiled defaults underneath.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `NERO_LOG_LEVEL`.
//! 2. **Config file**: `config.toml` by default, `--config` on the CLI. A missing file is fine.
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Repositories
//!
//! ```toml
//! [[repos]]
//! id = "generic"
//! path = "media/generic"          # omit for a memory-backed repository
//! index = "media/generic.jsonl"   # defaults to <path>/index.jsonl
//! ```
//!
//! Relative paths are resolved against the working directory when the repository opens.

use crate::error::{NeroError, Result};
use confique::Config;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const DEFAULT_INDEX_NAME: &str = "index.jsonl";

/// Top-level configuration, stored in `config.toml`.
#[derive(Config, Debug, Clone, PartialEq, Eq)]
pub struct NeroConfig {
    /// Default log filter when RUST_LOG is not set (e.g. "info", "nero=debug").
    #[config(default = "info", env = "NERO_LOG_LEVEL")]
    pub log_level: String,

    /// Repositories served by this instance.
    #[config(default = [])]
    pub repos: Vec<RepoConfig>,
}

/// One named repository.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RepoConfig {
    pub id: String,
    /// Storage root. Absent means memory-backed.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Index log location.
    #[serde(default)]
    pub index: Option<PathBuf>,
}

impl Default for NeroConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            repos: Vec::new(),
        }
    }
}

impl NeroConfig {
    /// Loads env over `path` over defaults, then validates.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config = NeroConfig::builder()
            .env()
            .file(path.as_ref())
            .load()?;
        config.validate()?;
        Ok(config)
    }

    /// A commented example document listing every setting.
    pub fn template() -> String {
        confique::toml::template::<NeroConfig>(confique::toml::FormatOptions::default())
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for repo in &self.repos {
            if repo.id.trim().is_empty() {
                return Err(NeroError::InvalidRequest(
                    "repository id must not be empty".to_string(),
                ));
            }
            if !seen.insert(repo.id.as_str()) {
                return Err(NeroError::InvalidRequest(format!(
                    "repository {} is configured twice",
                    repo.id
                )));
            }
            if repo.path.is_none() && repo.index.is_some() {
                return Err(NeroError::InvalidRequest(format!(
                    "repository {} has an index but no path",
                    repo.id
                )));
            }
        }
        Ok(())
    }
}

impl RepoConfig {
    pub fn memory(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: None,
            index: None,
        }
    }

    pub fn file(id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            path: Some(path.into()),
            index: None,
        }
    }

    /// The configured index, or `<path>/index.jsonl` for file-backed repositories.
    pub fn index_path(&self) -> Option<PathBuf> {
        self.index.clone().or_else(|| {
            self.path
                .as_ref()
                .map(|path| path.join(DEFAULT_INDEX_NAME))
        })
    }
}
