//! Serialization of attribute trees.
//!
//! Rendering happens in two steps. [`flatten_to_pairs`] walks a tree in key
//! order and produces `(name, value)` pairs, joining nested namespaces with
//! dashes (`data: {controller: ..}` → `data-controller`). [`serialize`] then
//! writes those pairs as `name="value"` text.
//!
//! ## Value Rendering
//!
//! | Value | Output |
//! |-------|--------|
//! | `null`, `false` | attribute omitted |
//! | `true` | `name="name"` (boolean attribute) |
//! | string, number | the value as text |
//! | empty token set | attribute omitted |
//! | token set | tokens joined by a space |
//! | other structures | JSON text |
//!
//! With [`BooleanStyle::Literal`], booleans nested under a namespace render as
//! `"true"` / `"false"` instead, which is what `aria-*` and `data-*`
//! attributes usually expect.

use crate::attributes::{dasherize, AttrValue, AttributeTree, Scalar};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A rendered attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedValue {
    Text(String),

    /// A value-less boolean attribute.
    Present,
}

impl RenderedValue {
    /// The text a `name="..."` serialization uses for this value.
    pub fn text_for<'a>(&'a self, name: &'a str) -> &'a str {
        match self {
            RenderedValue::Text(text) => text,
            RenderedValue::Present => name,
        }
    }
}

/// How booleans nested under a namespace render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BooleanStyle {
    /// Same as top-level booleans: `true` is present, `false` is omitted.
    #[default]
    Attribute,

    /// `true` / `false` as text.
    Literal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub boolean_style: BooleanStyle,
}

pub type Pairs = Vec<(String, RenderedValue)>;

/// Flattens `tree` into ordered pairs with default options.
pub fn flatten_to_pairs(tree: &AttributeTree) -> Pairs {
    flatten_to_pairs_with(tree, &RenderOptions::default())
}

pub fn flatten_to_pairs_with(tree: &AttributeTree, options: &RenderOptions) -> Pairs {
    let mut pairs = Vec::with_capacity(tree.len());
    flatten_into(tree, None, options, &mut pairs);
    pairs
}

fn flatten_into(
    tree: &AttributeTree,
    prefix: Option<&str>,
    options: &RenderOptions,
    out: &mut Pairs,
) {
    for (name, value) in tree.iter() {
        let full = match prefix {
            Some(prefix) => format!("{prefix}-{}", dasherize(name)),
            None => name.to_string(),
        };
        let rendered = match value {
            AttrValue::Tree(child) => {
                flatten_into(child, Some(&full), options, out);
                continue;
            }
            AttrValue::Tokens(tokens) if tokens.is_empty() => None,
            AttrValue::Tokens(tokens) => Some(RenderedValue::Text(tokens.render())),
            AttrValue::Scalar(scalar) => render_scalar(scalar, prefix.is_some(), options),
        };
        if let Some(rendered) = rendered {
            out.push((full, rendered));
        }
    }
}

fn render_scalar(scalar: &Scalar, nested: bool, options: &RenderOptions) -> Option<RenderedValue> {
    match scalar {
        Scalar::Null => None,
        Scalar::Bool(b) if nested && options.boolean_style == BooleanStyle::Literal => {
            Some(RenderedValue::Text(b.to_string()))
        }
        Scalar::Bool(true) => Some(RenderedValue::Present),
        Scalar::Bool(false) => None,
        Scalar::Number(n) => Some(RenderedValue::Text(n.to_string())),
        Scalar::String(s) => Some(RenderedValue::Text(s.clone())),
        Scalar::Structured(v) => Some(RenderedValue::Text(v.to_string())),
    }
}

/// Escapes text for an HTML attribute value or text node.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Writes pairs as `name="value"` joined by single spaces.
pub fn write_pairs<F>(pairs: &[(String, RenderedValue)], escape: F) -> String
where
    F: Fn(&str) -> String,
{
    let mut out = String::new();
    for (i, (name, value)) in pairs.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape(value.text_for(name)));
        out.push('"');
    }
    out
}

/// Serializes `tree` with default options and HTML escaping.
pub fn serialize(tree: &AttributeTree) -> String {
    serialize_with(tree, &RenderOptions::default(), escape_html)
}

/// Serializes `tree` with the caller's options and escape function.
pub fn serialize_with<F>(tree: &AttributeTree, options: &RenderOptions, escape: F) -> String
where
    F: Fn(&str) -> String,
{
    write_pairs(&flatten_to_pairs_with(tree, options), escape)
}

impl fmt::Display for AttributeTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize(self))
    }
}
