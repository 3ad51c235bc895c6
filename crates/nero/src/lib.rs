//! # Nero Architecture
//!
//! Nero is a small **embeddable media object store**. It keeps binary assets (images,
//! animated images) on disk next to a newline-delimited JSON index, assigns each asset a
//! stable UUID and serves point and random lookups to whatever hosts it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/nero-cli)                                │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Request-level rules: bounds, categories, not-found       │
//! │  - Public wire schema (`MediaView`)                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Registry (registry.rs) + Config (config.rs)                │
//! │  - Named repositories resolved from `config.toml`           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Repository: in-memory map under one RwLock               │
//! │  - IndexFile: append-one / rewrite-all JSON lines           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from `api.rs` inward takes Rust values and returns Rust values. Nothing in
//! this crate writes to stdout or exits the process; diagnostics go through `tracing`.
//!
//! ## Module Overview
//!
//! - [`model`]: [`model::Media`] and [`model::Format`]
//! - [`meta`]: the closed [`meta::Metadata`] union
//! - [`detect`]: magic-byte content sniffing
//! - [`store`]: [`store::Repository`] and its index log
//! - [`config`], [`registry`], [`api`]: the outer wiring

pub mod api;
pub mod config;
pub mod detect;
pub mod error;
pub mod meta;
pub mod model;
pub mod registry;
pub mod store;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::{NeroError, Result};
pub use meta::Metadata;
pub use model::{Format, Media};
pub use store::Repository;
