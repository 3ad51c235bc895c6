//! # Nero CLI
//!
//! The binary is intentionally thin: everything lives in `src/cli/`, this file only invokes
//! `cli::run()` and turns failures into an exit code.
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/nero-cli/src/cli/)                       │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - config + logging + dispatch (commands.rs, logging.rs)    │
//! │  - terminal / JSON output (render.rs)                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/nero/src/api.rs)                         │
//! │  - bounds, categories, not-found, wire schema               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from `api.rs` inward is UI agnostic. Only this crate writes to stdout, and
//! logs go to stderr so piped output stays parseable.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
