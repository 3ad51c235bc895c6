//! # Storage Layer
//!
//! This module owns the mapping between media identifiers and stored assets.
//!
//! ## Backing Modes
//!
//! A [`Repository`] is either:
//! 1. **Memory-backed**: an in-memory map only. Supports `add`, `get`, `remove` and the read
//!    operations, never touches disk, and refuses `create` with an `Unsupported` error.
//! 2. **File-backed**: a storage root holding one file per asset plus an index log that is
//!    the durable copy of the map.
//!
//! ## Index Log
//!
//! The index is newline-delimited JSON, one [`crate::model::Media`] record per line:
//!
//! ```text
//! {"id":"0b6c…","format":"image","path":"0b6c….jpg","meta":{"type":"generic"}}
//! {"id":"8f21…","format":"animated_image","path":"8f21….gif"}
//! ```
//!
//! - **Insert** appends exactly one line (O(1) I/O).
//! - **Remove** rewrites the whole file from the surviving map (O(n) I/O).
//!
//! A crash between a rewrite and a later append can leave a repeated record behind; the
//! loader keeps the first occurrence of an id.
//!
//! ## Reconciliation at Load
//!
//! Opening a file-backed repository replays the log:
//!
//! 1. **Blank lines**: skipped.
//! 2. **Malformed lines**: fatal. The log is machine-written, so damage means the file is
//!    corrupt or foreign and the repository refuses to open.
//! 3. **Duplicate ids**: first occurrence wins, later ones are dropped with a warning.
//! 4. **Missing assets**: records whose file is gone are dropped with a warning.
//!
//! Existence is only checked here, not continuously.
//!
//! ## Concurrency
//!
//! One `RwLock` per repository. Reads take it shared; `add` and `remove` take it exclusive
//! for the in-memory change *and* the index write, so writers are serialized against both
//! memory and disk. `create` writes the asset file before taking the lock, so concurrent
//! uploads write their files in parallel and only the index append is serialized.
//!
//! Two processes pointed at the same root will corrupt each other's index. Single-process
//! ownership of a storage location is assumed and not enforced.
//!
//! ## Storage Layout
//!
//! ```text
//! <root>/
//! ├── <uuid>.jpg
//! ├── <uuid>.gif
//! └── <uuid>            # unknown content has no extension
//! <index>.jsonl         # anywhere; conventionally <root>/index.jsonl
//! ```

pub mod index;
pub mod repository;

pub use index::IndexFile;
pub use repository::Repository;
