//! # Configuration
//!
//! Configuration is managed by [`confique`], layered in priority order:
//! 1. **Environment variables**: `ATTRSET_TOKEN_LISTS`,
//!    `ATTRSET_TOKEN_LIST_PATTERNS` (comma-separated) and
//!    `ATTRSET_BOOLEAN_STYLE`.
//! 2. **Config file**: an `attrset.toml`, when one is given.
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `token_lists` | `class`, `rel`, `aria-*` lists, `data-action`, `data-controller` | Names whose values are token lists |
//! | `token_list_patterns` | `["data-(.*)-target"]` | Regexes matched against whole names |
//! | `boolean_style` | `attribute` | `literal` renders nested booleans as `"true"`/`"false"` |
//!
//! A config only describes values. [`AttrsConfig::policy`] and
//! [`AttrsConfig::render_options`] turn it into the types the engine uses.

use crate::attributes::{NamePolicy, DEFAULT_TOKEN_LISTS, DEFAULT_TOKEN_LIST_PATTERNS};
use crate::error::{AttrsError, Result};
use crate::render::{BooleanStyle, RenderOptions};
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// File name looked up in the config directory.
pub const CONFIG_FILE_NAME: &str = "attrset.toml";

/// Configuration for attrset, stored in `attrset.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AttrsConfig {
    /// Attribute names (dashed form) whose values are token lists.
    #[config(
        default = [
            "class", "rel", "aria-controls", "aria-describedby", "aria-details",
            "aria-dropeffect", "aria-flowto", "aria-keyshortcuts", "aria-labelledby",
            "aria-owns", "aria-relevant", "data-action", "data-controller"
        ],
        env = "ATTRSET_TOKEN_LISTS",
        parse_env = confique::env::parse::list_by_comma
    )]
    pub token_lists: Vec<String>,

    /// Regexes for token-list names. Each must match the whole name.
    #[config(
        default = ["data-(.*)-target"],
        env = "ATTRSET_TOKEN_LIST_PATTERNS",
        parse_env = confique::env::parse::list_by_comma
    )]
    pub token_list_patterns: Vec<String>,

    /// How booleans nested under a namespace render: "attribute" or "literal".
    #[config(default = "attribute", env = "ATTRSET_BOOLEAN_STYLE", parse_env = parse_boolean_style)]
    pub boolean_style: BooleanStyle,
}

impl Default for AttrsConfig {
    fn default() -> Self {
        Self {
            token_lists: DEFAULT_TOKEN_LISTS.iter().map(|s| s.to_string()).collect(),
            token_list_patterns: DEFAULT_TOKEN_LIST_PATTERNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            boolean_style: BooleanStyle::default(),
        }
    }
}

impl AttrsConfig {
    /// Loads environment, then `path` if given, then compiled defaults.
    ///
    /// A missing file is not an error; a malformed one is.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = path {
            tracing::debug!(path = %path.display(), "loading config file");
            builder = builder.file(path);
        }
        Ok(builder.load()?)
    }

    /// The name policy described by this config.
    pub fn policy(&self) -> Result<NamePolicy> {
        let mut policy = NamePolicy::empty();
        for name in &self.token_lists {
            policy.register_exact(name.trim());
        }
        for pattern in &self.token_list_patterns {
            policy.register_pattern(pattern.trim())?;
        }
        Ok(policy)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            boolean_style: self.boolean_style,
        }
    }

    /// A commented `attrset.toml` with every setting at its default.
    pub fn template() -> String {
        confique::toml::template::<Self>(confique::toml::FormatOptions::default())
    }
}

impl FromStr for BooleanStyle {
    type Err = AttrsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "attribute" => Ok(BooleanStyle::Attribute),
            "literal" => Ok(BooleanStyle::Literal),
            other => Err(AttrsError::Config(format!(
                "unknown boolean style {other:?}, expected \"attribute\" or \"literal\""
            ))),
        }
    }
}

fn parse_boolean_style(raw: &str) -> Result<BooleanStyle> {
    raw.parse()
}
