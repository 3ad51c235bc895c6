use crate::error::{combine, NeroError, Result};
use crate::meta::Metadata;
use crate::model::{Format, Media};
use serde::Serialize;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

/// The on-disk shape of one index line.
///
/// Borrowed from a [`Media`] so encoding never clones the entity.
#[derive(Serialize)]
struct Record<'a> {
    id: Uuid,
    format: Format,
    path: &'a Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<&'a Metadata>,
}

/// Newline-delimited JSON log of a repository's entities.
#[derive(Debug, Clone)]
pub struct IndexFile {
    path: PathBuf,
    root: PathBuf,
}

impl IndexFile {
    /// `root` must already be absolute; record paths are resolved against it.
    pub fn new(path: PathBuf, root: PathBuf) -> Self {
        Self { path, root }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Replays the log into a map, dropping duplicates and records whose asset is gone.
    ///
    /// A missing index file is a first run and yields an empty map.
    pub fn load(&self, repo: &str) -> Result<HashMap<Uuid, Media>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(NeroError::io("open index", &self.path)(e)),
        };

        let mut items = HashMap::new();
        // Lines are decoded as bytes so invalid UTF-8 surfaces as corruption, not I/O.
        for (i, line) in BufReader::new(file).split(b'\n').enumerate() {
            let line = line.map_err(NeroError::io("read index", &self.path))?;
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            let mut media: Media =
                serde_json::from_slice(&line).map_err(|source| NeroError::IndexCorrupt {
                    path: self.path.clone(),
                    line: i + 1,
                    source,
                })?;

            if items.contains_key(&media.id) {
                warn!(repo, id = %media.id, "duplicate item in index");
                continue;
            }

            if media.path.is_relative() {
                media.path = self.root.join(&media.path);
            }

            // Only a confirmed absence drops a record.
            if let Ok(false) = media.path.try_exists() {
                warn!(
                    repo,
                    id = %media.id,
                    path = %media.path.display(),
                    "missing item in index"
                );
                continue;
            }

            items.insert(media.id, media);
        }

        debug!(repo, items = items.len(), index = %self.path.display(), "loaded index");
        Ok(items)
    }

    /// Appends a single record, creating the log if needed.
    pub fn append(&self, media: &Media) -> Result<()> {
        let line = self.encode(media)?;

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(NeroError::io("open index", &self.path))?;

        let written = file
            .write_all(&line)
            .map_err(NeroError::io("write index", &self.path));
        let synced = file
            .sync_data()
            .map_err(NeroError::io("sync index", &self.path));
        combine(written, synced)?;

        debug!(id = %media.id, index = %self.path.display(), "appended index record");
        Ok(())
    }

    /// Replaces the log with one record per entity.
    ///
    /// The new contents go to a temporary sibling that is renamed over the log, so a failed
    /// rewrite leaves the previous log intact.
    pub fn rewrite<'a, I>(&self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Media>,
    {
        let tmp_path = self.tmp_path();
        let file = File::create(&tmp_path).map_err(NeroError::io("create index", &tmp_path))?;

        let mut writer = BufWriter::new(file);
        let mut count = 0usize;
        let written = items.into_iter().try_for_each(|media| {
            let line = self.encode(media)?;
            count += 1;
            writer
                .write_all(&line)
                .map_err(NeroError::io("write index", &tmp_path))
        });
        let synced = writer
            .into_inner()
            .map_err(|e| NeroError::io("flush index", &tmp_path)(e.into_error()))
            .and_then(|file| {
                file.sync_data()
                    .map_err(NeroError::io("sync index", &tmp_path))
            });

        if let Err(err) = combine(written, synced) {
            let _ = fs::remove_file(&tmp_path);
            return Err(err);
        }

        fs::rename(&tmp_path, &self.path).map_err(NeroError::io("replace index", &self.path))?;

        debug!(items = count, index = %self.path.display(), "rewrote index");
        Ok(())
    }

    fn encode(&self, media: &Media) -> Result<Vec<u8>> {
        // Relative when the asset lives under the root, absolute otherwise.
        let path = media.path.strip_prefix(&self.root).unwrap_or(&media.path);

        let mut line = serde_json::to_vec(&Record {
            id: media.id,
            format: media.format,
            path,
            meta: media.meta.as_ref(),
        })?;
        line.push(b'\n');
        Ok(line)
    }

    fn tmp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "index".to_string());
        self.path
            .with_file_name(format!(".{}-{}.tmp", name, Uuid::new_v4()))
    }
}
