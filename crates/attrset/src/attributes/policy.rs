//! Token-list name policy.
//!
//! The policy decides which attribute names combine as [`TokenSet`]s and which
//! are plain scalars. Names are checked in their dashed form, so
//! `data_controller` and `data-controller` are the same name here.
//!
//! [`TokenSet`]: crate::tokens::TokenSet

use crate::error::{AttrsError, Result};
use indexmap::IndexSet;
use once_cell::sync::{Lazy, OnceCell};
use regex::Regex;
use std::borrow::Cow;

/// Attribute names that hold token lists out of the box.
pub const DEFAULT_TOKEN_LISTS: &[&str] = &[
    "class",
    "rel",
    "aria-controls",
    "aria-describedby",
    "aria-details",
    "aria-dropeffect",
    "aria-flowto",
    "aria-keyshortcuts",
    "aria-labelledby",
    "aria-owns",
    "aria-relevant",
    "data-action",
    "data-controller",
];

/// Name shapes that hold token lists out of the box (Stimulus targets).
pub const DEFAULT_TOKEN_LIST_PATTERNS: &[&str] = &["data-(.*)-target"];

static DEFAULT_POLICY: Lazy<NamePolicy> = Lazy::new(NamePolicy::builtin);
static GLOBAL_POLICY: OnceCell<NamePolicy> = OnceCell::new();

/// Maps a name to its dashed form (`aria_labelledby` → `aria-labelledby`).
pub fn dasherize(name: &str) -> Cow<'_, str> {
    if name.contains('_') {
        Cow::Owned(name.replace('_', "-"))
    } else {
        Cow::Borrowed(name)
    }
}

#[derive(Debug, Clone)]
struct Pattern {
    source: String,
    regex: Regex,
}

/// Registry of exact names and name patterns that receive token-list semantics.
#[derive(Debug, Clone, Default)]
pub struct NamePolicy {
    exact: IndexSet<String>,
    patterns: Vec<Pattern>,
}

impl NamePolicy {
    /// A policy that treats every name as a scalar.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in policy: [`DEFAULT_TOKEN_LISTS`] and [`DEFAULT_TOKEN_LIST_PATTERNS`].
    pub fn builtin() -> Self {
        let mut policy = Self::empty();
        for name in DEFAULT_TOKEN_LISTS {
            policy.register_exact(name);
        }
        for pattern in DEFAULT_TOKEN_LIST_PATTERNS {
            policy
                .register_pattern(pattern)
                .expect("built-in token list patterns are valid");
        }
        policy
    }

    /// Adds an exact name. Registering a name twice has no effect.
    pub fn register_exact(&mut self, name: &str) -> &mut Self {
        let name = dasherize(name).into_owned();
        if self.exact.insert(name.clone()) {
            tracing::debug!(%name, "registered token list attribute");
        }
        self
    }

    /// Adds a name pattern, matched against the whole dashed name.
    ///
    /// `data-(.*)-target` matches `data-search-target` but not
    /// `data-search-targets`.
    pub fn register_pattern(&mut self, pattern: &str) -> Result<&mut Self> {
        if self.patterns.iter().any(|p| p.source == pattern) {
            return Ok(self);
        }
        let regex =
            Regex::new(&format!("^(?:{pattern})$")).map_err(|source| AttrsError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        tracing::debug!(pattern, "registered token list pattern");
        self.patterns.push(Pattern {
            source: pattern.to_string(),
            regex,
        });
        Ok(self)
    }

    /// Whether `name` receives token-list semantics.
    pub fn is_token_list_attribute(&self, name: &str) -> bool {
        let name = dasherize(name);
        self.exact.contains(&*name) || self.patterns.iter().any(|p| p.regex.is_match(&name))
    }

    /// Whether a leaf nested under `namespace` receives token-list semantics.
    ///
    /// Both the bare leaf (`controller`) and the qualified name
    /// (`data-controller`) are checked.
    pub fn is_nested_token_list<S: AsRef<str>>(&self, namespace: &[S], leaf: &str) -> bool {
        if self.is_token_list_attribute(leaf) {
            return true;
        }
        if namespace.is_empty() {
            return false;
        }
        let mut qualified = String::new();
        for segment in namespace {
            qualified.push_str(segment.as_ref());
            qualified.push('-');
        }
        qualified.push_str(leaf);
        self.is_token_list_attribute(&qualified)
    }

    pub fn exact_names(&self) -> impl Iterator<Item = &str> {
        self.exact.iter().map(String::as_str)
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.source.as_str())
    }

    /// Installs the process-wide policy. Only the first install succeeds.
    pub fn install(policy: NamePolicy) -> Result<()> {
        GLOBAL_POLICY
            .set(policy)
            .map_err(|_| AttrsError::PolicyAlreadyInstalled)?;
        tracing::debug!("installed global name policy");
        Ok(())
    }

    /// The installed process-wide policy, or the built-in one.
    pub fn global() -> &'static NamePolicy {
        GLOBAL_POLICY.get().unwrap_or(&DEFAULT_POLICY)
    }
}
