use super::index::IndexFile;
use crate::detect::detect;
use crate::error::{combine, NeroError, Result};
use crate::meta::Metadata;
use crate::model::{Format, Media};
use parking_lot::RwLock;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// A named set of media entities, optionally backed by a storage root and an index log.
///
/// All methods take `&self`; share a repository across threads with `Arc`.
#[derive(Debug)]
pub struct Repository {
    id: String,
    index: Option<IndexFile>,
    items: RwLock<HashMap<Uuid, Media>>,
}

impl Repository {
    /// A repository that lives only in memory and never touches disk.
    pub fn memory(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            index: None,
            items: RwLock::new(HashMap::new()),
        }
    }

    /// Opens a file-backed repository, creating the root if needed and replaying the index.
    pub fn open(
        id: impl Into<String>,
        root: impl AsRef<Path>,
        index: impl AsRef<Path>,
    ) -> Result<Self> {
        let id = id.into();
        let root = absolute(root.as_ref())?;
        let index_path = absolute(index.as_ref())?;

        fs::create_dir_all(&root).map_err(NeroError::io("create directory", &root))?;
        if let Some(parent) = index_path.parent() {
            fs::create_dir_all(parent).map_err(NeroError::io("create directory", parent))?;
        }

        let index = IndexFile::new(index_path, root);
        let items = index.load(&id)?;

        info!(
            repo = %id,
            items = items.len(),
            root = %index.root().display(),
            "opened repository"
        );

        Ok(Self {
            id,
            index: Some(index),
            items: RwLock::new(items),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn root(&self) -> Option<&Path> {
        self.index.as_ref().map(IndexFile::root)
    }

    pub fn index_path(&self) -> Option<&Path> {
        self.index.as_ref().map(IndexFile::path)
    }

    pub fn is_file_backed(&self) -> bool {
        self.index.is_some()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Returns a copy of the entity, if present.
    pub fn get(&self, id: &Uuid) -> Option<Media> {
        self.items.read().get(id).cloned()
    }

    /// Copies of every entity. Order is unspecified.
    pub fn items(&self) -> Vec<Media> {
        self.items.read().values().cloned().collect()
    }

    /// Up to `n` distinct entities drawn uniformly at random.
    pub fn random(&self, n: usize) -> Vec<Media> {
        self.random_with(n, &mut rand::thread_rng())
    }

    /// Like [`Repository::random`], drawing from the given generator.
    ///
    /// Shuffles the full item set, so cost is O(total items) regardless of `n`.
    pub fn random_with<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<Media> {
        self.random_matching_with(n, rng, |_| true)
    }

    /// Up to `n` distinct entities satisfying `filter`, drawn uniformly at random.
    pub fn random_matching_with<R, F>(&self, n: usize, rng: &mut R, filter: F) -> Vec<Media>
    where
        R: Rng + ?Sized,
        F: Fn(&Media) -> bool,
    {
        if n == 0 {
            return Vec::new();
        }

        let mut items: Vec<Media> = self
            .items
            .read()
            .values()
            .filter(|media| filter(media))
            .cloned()
            .collect();
        items.shuffle(rng);
        items.truncate(n);
        items
    }

    /// Stores `bytes` as a new asset file and indexes it.
    ///
    /// The file is written before the repository lock is taken. If indexing then fails the
    /// error is [`NeroError::NotIndexed`], which still carries the constructed entity.
    pub fn create(&self, bytes: &[u8], meta: Option<Metadata>) -> Result<Media> {
        let Some(index) = &self.index else {
            return Err(NeroError::Unsupported {
                repo: self.id.clone(),
                action: "create media",
            });
        };

        let mime = detect(bytes);
        let id = Uuid::new_v4();
        let path = index.root().join(format!("{}{}", id, mime.extension));

        write_asset(&path, bytes)?;

        let media = Media::new(id, Format::from_mime(mime.name), path, meta);
        debug!(
            repo = %self.id,
            id = %media.id,
            mime = mime.name,
            format = %media.format,
            size = bytes.len(),
            "created media"
        );

        match self.add(media.clone()) {
            Ok(()) => Ok(media),
            Err(err) => {
                // Nothing was inserted, so the file would be unreachable.
                if let NeroError::DuplicateId { .. } = err {
                    if let Err(e) = fs::remove_file(&media.path) {
                        warn!(
                            repo = %self.id,
                            path = %media.path.display(),
                            error = %e,
                            "failed to remove orphaned asset"
                        );
                    }
                }
                Err(NeroError::NotIndexed {
                    media: Box::new(media),
                    source: Box::new(err),
                })
            }
        }
    }

    /// Inserts an entity and appends it to the index.
    ///
    /// A relative path is resolved against the storage root, or the working directory for
    /// memory-backed repositories.
    ///
    /// A failed append is returned but the in-memory insert stands; memory and disk may
    /// disagree until the next rewrite or restart.
    pub fn add(&self, mut media: Media) -> Result<()> {
        if media.path.is_relative() {
            media.path = match self.root() {
                Some(root) => root.join(&media.path),
                None => absolute(&media.path)?,
            };
        }

        let mut items = self.items.write();

        let media = match items.entry(media.id) {
            Entry::Occupied(_) => {
                return Err(NeroError::DuplicateId {
                    repo: self.id.clone(),
                    id: media.id,
                });
            }
            Entry::Vacant(slot) => slot.insert(media),
        };

        if let Some(index) = &self.index {
            index.append(media)?;
        }
        Ok(())
    }

    /// Drops an entity from the index, returning it if it was present.
    ///
    /// The index is rewritten either way. The asset file stays on disk.
    pub fn remove(&self, id: &Uuid) -> Result<Option<Media>> {
        let mut items = self.items.write();
        let removed = items.remove(id);

        if let Some(index) = &self.index {
            index.rewrite(items.values())?;
        }

        debug!(repo = %self.id, id = %id, removed = removed.is_some(), "removed media");
        Ok(removed)
    }

    pub fn close(&self) -> Result<()> {
        Ok(())
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(NeroError::io("resolve path", path))
}

fn write_asset(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(NeroError::io("create asset", path))?;

    let written = file
        .write_all(bytes)
        .map_err(NeroError::io("write asset", path));
    let synced = file.sync_all().map_err(NeroError::io("sync asset", path));
    combine(written, synced)
}
