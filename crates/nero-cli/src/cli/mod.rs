//! # CLI Layer
//!
//! The CLI layer is the **only** place in the workspace that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Installs the tracing subscriber
//! - Formats output for human consumption
//!
//! Uploads, listings and removals operate on the repositories named in the config file,
//! directly on the local storage directories.

mod commands;
mod logging;
mod render;
mod setup;

pub use commands::run;
