//! The attribute tree.
//!
//! An [`AttributeTree`] is an immutable, ordered mapping from attribute name
//! to [`AttrValue`]. Trees share their storage, so cloning one is cheap and a
//! single base tree can seed any number of derived trees.
//!
//! ## Override Markers
//!
//! A raw key ending in `!` (e.g. `class!`) is stored under its bare name
//! (`class`) and flags that entry to *replace* rather than combine the next
//! time this tree is merged into another one. The flag never shows up as a
//! key and is dropped by the merge that consumes it.
//!
//! ## Canonical Keys
//!
//! Keys nested under a namespace are stored in dashed form, so
//! `data: {turbo_frame: ..}` and `data: {turbo-frame: ..}` name the same
//! entry. Top-level keys are stored as written.

use super::merge;
use super::policy::{dasherize, NamePolicy};
use super::value::{AttrValue, Scalar};
use crate::error::Result;
use crate::tokens::TokenSet;
use indexmap::{IndexMap, IndexSet};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::sync::Arc;

/// Suffix that turns a key into a one-shot "replace, don't combine" instruction.
pub const OVERRIDE_MARKER: char = '!';

/// Splits a raw key into its canonical name and whether it carried the marker.
pub fn split_marker(key: &str) -> (&str, bool) {
    match key.strip_suffix(OVERRIDE_MARKER) {
        Some(name) => (name, true),
        None => (key, false),
    }
}

/// Immutable, ordered attribute mapping.
#[derive(Debug, Clone, Default)]
pub struct AttributeTree {
    entries: Arc<IndexMap<String, AttrValue>>,
    replace: IndexSet<String>,
}

impl AttributeTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tree from raw input using `policy` to pick token-list values.
    ///
    /// Anything other than a JSON object (including `null`) yields an empty tree.
    pub fn build(raw: &Value, policy: &NamePolicy) -> Self {
        match raw {
            Value::Object(map) => build_map(map, &mut Vec::new(), policy),
            Value::Null => Self::new(),
            other => {
                tracing::trace!(kind = json_kind(other), "ignoring non-mapping attribute input");
                Self::new()
            }
        }
    }

    /// Builds a tree with the process-wide [`NamePolicy`].
    pub fn from_value(raw: &Value) -> Self {
        Self::build(raw, NamePolicy::global())
    }

    /// Parses JSON text and builds a tree with the process-wide policy.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let raw: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(&raw))
    }

    /// Builds a tree from typed pairs. Keys may carry the override marker.
    pub fn from_pairs<I, K, V>(pairs: I, policy: &NamePolicy) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<AttrValue>,
    {
        let mut tree = Self::new();
        let entries = Arc::make_mut(&mut tree.entries);
        for (key, value) in pairs {
            let (name, marked) = split_marker(key.as_ref());
            let value = rewrap(value.into(), &mut Vec::new(), name, policy);
            insert_entry(entries, &mut tree.replace, &[], name, marked, value, policy);
        }
        tree
    }

    /// Combines trees left to right, starting from the empty tree.
    pub fn combine<I>(trees: I) -> Self
    where
        I: IntoIterator<Item = AttributeTree>,
    {
        let policy = NamePolicy::global();
        trees
            .into_iter()
            .fold(Self::new(), |acc, tree| merge::merge(&acc, &tree, policy))
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.entries.get(name)
    }

    /// Looks up a value through nested trees (`["data", "controller"]`).
    pub fn get_path<S: AsRef<str>>(&self, path: &[S]) -> Option<&AttrValue> {
        let (last, parents) = path.split_last()?;
        let mut tree = self;
        for segment in parents {
            tree = tree.get(segment.as_ref())?.as_tree()?;
        }
        tree.get(last.as_ref())
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Merges `other` into a new tree using the process-wide policy.
    pub fn merge(&self, other: &AttributeTree) -> AttributeTree {
        merge::merge(self, other, NamePolicy::global())
    }

    /// Merges `other` into a new tree using `policy`.
    pub fn merge_with(&self, other: &AttributeTree, policy: &NamePolicy) -> AttributeTree {
        merge::merge(self, other, policy)
    }

    /// Builds `raw` into a tree and merges it into a new tree.
    pub fn merge_value(&self, raw: &Value) -> AttributeTree {
        self.merge(&AttributeTree::from_value(raw))
    }

    /// Merges `values` under the `aria` namespace.
    pub fn aria(&self, values: &Value) -> AttributeTree {
        self.merge_value(&namespaced("aria", values))
    }

    /// Merges `values` under the `data` namespace.
    pub fn data(&self, values: &Value) -> AttributeTree {
        self.merge_value(&namespaced("data", values))
    }

    /// Plain nested mapping with token sets rendered as strings.
    pub fn to_flat_mapping(&self) -> Map<String, Value> {
        self.entries
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect()
    }

    pub(crate) fn entries(&self) -> &IndexMap<String, AttrValue> {
        &self.entries
    }

    pub(crate) fn from_entries(entries: IndexMap<String, AttrValue>) -> Self {
        Self {
            entries: Arc::new(entries),
            replace: IndexSet::new(),
        }
    }

    pub(crate) fn is_marked_for_replace(&self, name: &str) -> bool {
        self.replace.contains(name)
    }

    fn has_pending_overrides(&self) -> bool {
        !self.replace.is_empty()
            || self
                .entries
                .values()
                .any(|v| matches!(v, AttrValue::Tree(t) if t.has_pending_overrides()))
    }

    /// This tree with every pending override marker dropped, at all depths.
    pub(crate) fn settled(&self) -> AttributeTree {
        if !self.has_pending_overrides() {
            return self.clone();
        }
        let entries = self
            .entries
            .iter()
            .map(|(name, value)| (name.clone(), settle_value(value)))
            .collect();
        Self::from_entries(entries)
    }
}

pub(crate) fn settle_value(value: &AttrValue) -> AttrValue {
    match value {
        AttrValue::Tree(tree) => AttrValue::Tree(tree.settled()),
        other => other.clone(),
    }
}

/// The stored form of `name` at `namespace`: dashed when nested.
pub(crate) fn canonical_key<'a, S: AsRef<str>>(namespace: &[S], name: &'a str) -> Cow<'a, str> {
    if namespace.is_empty() {
        Cow::Borrowed(name)
    } else {
        dasherize(name)
    }
}

/// Wraps a value as a token set when `policy` says its name is a token list.
///
/// A nested tree under a token-list name is read as a flag map.
pub(crate) fn wrap_leaf<S: AsRef<str>>(
    value: AttrValue,
    namespace: &[S],
    name: &str,
    policy: &NamePolicy,
) -> AttrValue {
    if matches!(value, AttrValue::Tokens(_)) || !policy.is_nested_token_list(namespace, name) {
        return value;
    }
    AttrValue::Tokens(TokenSet::normalize(&value.to_json()))
}

/// Re-applies `policy` to a typed value placed at `namespace`/`name`.
fn rewrap(value: AttrValue, namespace: &mut Vec<String>, name: &str, policy: &NamePolicy) -> AttrValue {
    match value {
        AttrValue::Tree(tree) if !policy.is_nested_token_list(namespace.as_slice(), name) => {
            namespace.push(name.to_string());
            let mut entries = IndexMap::with_capacity(tree.len());
            let mut replace = IndexSet::new();
            for (child, value) in tree.entries.iter() {
                let key = dasherize(child);
                let value = rewrap(value.clone(), namespace, &key, policy);
                let marked = tree.replace.contains(child);
                insert_entry(&mut entries, &mut replace, namespace.as_slice(), &key, marked, value, policy);
            }
            namespace.pop();
            AttrValue::Tree(AttributeTree {
                entries: Arc::new(entries),
                replace,
            })
        }
        other => wrap_leaf(other, namespace.as_slice(), name, policy),
    }
}

fn build_map(map: &Map<String, Value>, namespace: &mut Vec<String>, policy: &NamePolicy) -> AttributeTree {
    let mut entries = IndexMap::with_capacity(map.len());
    let mut replace = IndexSet::new();
    for (key, raw) in map {
        let (name, marked) = split_marker(key);
        let name = canonical_key(namespace.as_slice(), name);
        let value = match raw {
            _ if policy.is_nested_token_list(namespace.as_slice(), &name) => {
                AttrValue::Tokens(TokenSet::normalize(raw))
            }
            Value::Object(child) => {
                namespace.push(name.to_string());
                let tree = build_map(child, namespace, policy);
                namespace.pop();
                AttrValue::Tree(tree)
            }
            other => AttrValue::Scalar(Scalar::from_json(other)),
        };
        insert_entry(&mut entries, &mut replace, namespace, &name, marked, value, policy);
    }
    AttributeTree {
        entries: Arc::new(entries),
        replace,
    }
}

/// Inserts one constructed entry; a name seen twice in one input combines
/// like a merge unless the later spelling carried the marker.
fn insert_entry(
    entries: &mut IndexMap<String, AttrValue>,
    replace: &mut IndexSet<String>,
    namespace: &[String],
    name: &str,
    marked: bool,
    value: AttrValue,
    policy: &NamePolicy,
) {
    if marked {
        replace.insert(name.to_string());
        entries.insert(name.to_string(), value);
        return;
    }
    let combined = match entries.get(name) {
        Some(existing) => {
            let mut path = namespace.to_vec();
            path.push(name.to_string());
            merge::combine_values(existing, &value, &mut path, policy)
        }
        None => value,
    };
    entries.insert(name.to_string(), combined);
}

fn namespaced(namespace: &str, values: &Value) -> Value {
    let mut map = Map::new();
    map.insert(namespace.to_string(), values.clone());
    Value::Object(map)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Equality compares entries in order; pending override markers are ignored.
impl PartialEq for AttributeTree {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl From<Value> for AttributeTree {
    fn from(raw: Value) -> Self {
        AttributeTree::from_value(&raw)
    }
}

impl From<&Value> for AttributeTree {
    fn from(raw: &Value) -> Self {
        AttributeTree::from_value(raw)
    }
}

impl Serialize for AttributeTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in self.entries.iter() {
            match value {
                AttrValue::Scalar(s) => map.serialize_entry(name, &s.to_json())?,
                AttrValue::Tokens(t) => map.serialize_entry(name, t)?,
                AttrValue::Tree(t) => map.serialize_entry(name, t)?,
            }
        }
        map.end()
    }
}
