//! # Command Handlers
//!
//! One function per subcommand. Handlers take parsed arguments plus the
//! [`AppState`] built from configuration and return the text to print, so
//! they can be tested without a terminal.

use super::render::render_tree;
use super::setup::OutputFormat;
use anyhow::{Context, Result};
use attrset::config::AttrsConfig;
use attrset::merger::{AttributeMerger, HtmlTagRenderer};
use attrset::render::RenderOptions;
use attrset::{token_list, AttributeTree, NamePolicy};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Everything handlers need from configuration.
pub struct AppState<'p> {
    pub policy: &'p NamePolicy,
    pub options: RenderOptions,
}

impl<'p> AppState<'p> {
    pub fn new(policy: &'p NamePolicy, options: RenderOptions) -> Self {
        Self { policy, options }
    }

    /// Parses each argument and folds the trees left to right.
    fn combine(&self, sets: &[String]) -> Result<AttributeTree> {
        let mut combined = AttributeTree::new();
        for set in sets {
            let raw = read_attribute_set(set)?;
            let tree = AttributeTree::build(&raw, self.policy);
            combined = combined.merge_with(&tree, self.policy);
        }
        Ok(combined)
    }
}

/// Reads one attribute set: `@path` loads a JSON file, anything else is inline JSON.
fn read_attribute_set(arg: &str) -> Result<Value> {
    let (text, source) = match arg.strip_prefix('@') {
        Some(path) => (
            fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?,
            path,
        ),
        None => (arg.to_string(), "argument"),
    };
    let raw: Value =
        serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {source}"))?;
    if !raw.is_object() && !raw.is_null() {
        anyhow::bail!("Attribute set in {source} must be a JSON object");
    }
    Ok(raw)
}

pub fn merge(state: &AppState<'_>, sets: &[String], format: OutputFormat) -> Result<String> {
    let tree = state.combine(sets)?;
    tracing::debug!(sets = sets.len(), keys = tree.len(), "merged attribute sets");
    render_tree(&tree, format, &state.options)
}

/// Values that parse as JSON are normalized structurally, the rest as text.
pub fn tokens(values: &[String]) -> String {
    let parsed = values.iter().map(|raw| {
        serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.clone()))
    });
    token_list(parsed).render()
}

pub fn tag(state: &AppState<'_>, name: &str, sets: &[String], content: Option<&str>) -> Result<String> {
    let renderer = HtmlTagRenderer;
    let merger = AttributeMerger::new(&renderer, state.combine(sets)?)
        .with_render_options(state.options);
    Ok(merger.tag(name, &AttributeTree::new(), content))
}

pub fn config_show(config: &AttrsConfig) -> Result<String> {
    Ok(serde_json::to_string_pretty(config)?)
}

pub fn config_path(path: Option<&Path>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "No config directory available".to_string(),
    }
}

pub fn config_template() -> String {
    AttrsConfig::template()
}

/// `--config` wins; otherwise `attrset.toml` in the user config directory.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    directories::ProjectDirs::from("", "", "attrset")
        .map(|dirs| dirs.config_dir().join(attrset::config::CONFIG_FILE_NAME))
}
