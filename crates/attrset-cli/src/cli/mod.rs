//! # CLI Behavior
//!
//! This is **one possible client** for attrset, not the library itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! For the overall architecture, see the crate-level documentation in [`crate`].
//!
//! ## Attribute Sets as Arguments
//!
//! Every command that takes attribute sets accepts them two ways:
//!
//! - **Inline JSON**: `attrset merge '{"class": "btn"}'`
//! - **A file**: `attrset merge @button.json` reads `button.json`
//!
//! Sets fold left to right, so later sets override earlier ones and token
//! lists such as `class` accumulate.
//!
//! ## Configuration
//!
//! `--config PATH` picks the config file; without it the CLI reads
//! `attrset.toml` from the user config directory when one exists.
//! `ATTRSET_*` environment variables override both.
//!
//! ## Module Structure
//!
//! - `commands`: Context setup and dispatch
//! - `handlers`: Per-command handlers that call the library and return output
//! - `render`: Output formatting for `merge --format`
//! - `setup`: Argument parsing via clap, help text

mod commands;
mod handlers;
mod render;
pub mod setup;

pub use commands::run;
