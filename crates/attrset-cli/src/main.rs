//! # Attrset CLI Architecture
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! Attrset is organized as a Cargo workspace with two crates:
//! - `crates/attrset/` — The attribute engine, serializer and composition helpers
//! - `crates/attrset-cli/` — This CLI tool, depends on the `attrset` library
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/attrset-cli/src/cli/)                    │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Config loading + dispatch (commands.rs)                  │
//! │  - Handlers returning printable text (handlers.rs)          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Library (crates/attrset/src/)                              │
//! │  - Pure merge + serialization                               │
//! │  - No knowledge of stdout/stderr or process exits           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Testing Approach
//!
//! - **Library**: unit tests per module plus property tests of the merge laws.
//! - **Handlers**: called directly with argument strings, output compared as text.
//! - **Binary**: `tests/cli.rs` runs the built executable with `assert_cmd`.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
