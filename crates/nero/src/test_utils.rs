use crate::model::{Format, Media};
use crate::store::Repository;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use uuid::Uuid;

pub const JPEG_BYTES: &[u8] = &[
    0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01, 0x01, 0x00, 0x00,
    0x01, 0x00, 0x01, 0x00, 0x00, 0xFF, 0xD9,
];

pub const PNG_BYTES: &[u8] = &[
    0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, // signature
    0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D', b'R', // IHDR
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, //
    0x1F, 0x15, 0xC4, 0x89, // crc
    0x00, 0x00, 0x00, 0x00, b'I', b'D', b'A', b'T', 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82,
];

pub const APNG_BYTES: &[u8] = &[
    0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, // signature
    0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D', b'R', // IHDR
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, //
    0x1F, 0x15, 0xC4, 0x89, // crc
    0x00, 0x00, 0x00, 0x08, b'a', b'c', b'T', b'L', // acTL
    0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, // crc
    0x00, 0x00, 0x00, 0x00, b'I', b'D', b'A', b'T', 0x00, 0x00, 0x00, 0x00, //
];

pub const GIF_BYTES: &[u8] = &[
    b'G', b'I', b'F', b'8', b'9', b'a', 0x01, 0x00, 0x01, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00,
    0x00, 0xFF, 0xFF, 0xFF, 0x21, 0xF9, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x3B,
];

pub const WEBP_BYTES: &[u8] = &[
    b'R', b'I', b'F', b'F', 0x1A, 0x00, 0x00, 0x00, b'W', b'E', b'B', b'P', b'V', b'P', b'8',
    b'L', 0x0D, 0x00, 0x00, 0x00, 0x2F, 0x00, 0x00, 0x00, 0x10, 0x07, 0x10, 0x11, 0x11, 0x88,
    0x88, 0xFE, 0x07, 0x00,
];

pub struct TestEnv {
    // Keeps the directory alive for the duration of the test.
    pub _temp_dir: TempDir,
    pub root: PathBuf,
    pub index: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().join("media");
        let index = temp_dir.path().join("index.jsonl");
        Self {
            _temp_dir: temp_dir,
            root,
            index,
        }
    }

    pub fn open(&self) -> Repository {
        Repository::open("test", &self.root, &self.index).expect("failed to open repository")
    }

    /// Writes an asset file under the root and returns a matching entity.
    pub fn media(&self, name: &str) -> Media {
        fs::create_dir_all(&self.root).expect("failed to create root");
        let path = self.root.join(name);
        fs::write(&path, JPEG_BYTES).expect("failed to write asset");
        Media::new(Uuid::new_v4(), Format::Image, path, None)
    }
}

/// An entity that never touches disk, for memory-backed repositories.
pub fn virtual_media(path: impl AsRef<Path>) -> Media {
    Media::new(
        Uuid::new_v4(),
        Format::Unknown,
        path.as_ref().to_path_buf(),
        None,
    )
}
