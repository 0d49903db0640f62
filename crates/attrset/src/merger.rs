//! # Attribute Merger
//!
//! An [`AttributeMerger`] pairs a base attribute tree with a [`TagRenderer`]
//! so that every tag it renders starts from those base attributes:
//!
//! ```
//! use attrset::attributes::AttributeTree;
//! use attrset::merger::{AttributeMerger, HtmlTagRenderer};
//! use serde_json::json;
//!
//! let renderer = HtmlTagRenderer;
//! let button = AttributeMerger::new(&renderer, AttributeTree::from_value(&json!({"class": "border p-4"})));
//! let primary = button.with_attributes(&AttributeTree::from_value(&json!({"class": "text-red-500"})));
//!
//! assert_eq!(
//!     primary.tag("a", &AttributeTree::from_value(&json!({"href": "/"})), Some("Go")),
//!     r#"<a class="border p-4 text-red-500" href="/">Go</a>"#
//! );
//! ```
//!
//! The merger only knows a fixed set of operations (`merge`,
//! `with_attributes`, `tag`, `Display`) plus [`AttributeMerger::forward`],
//! which hands the renderer and the merged attributes to a closure for
//! anything else the renderer can do.

use crate::attributes::{AttributeTree, NamePolicy};
use crate::render::{self, flatten_to_pairs_with, escape_html, RenderOptions, RenderedValue};
use std::fmt;

/// The markup side of rendering: turns pairs into an element.
pub trait TagRenderer {
    fn content_tag(
        &self,
        name: &str,
        attributes: &[(String, RenderedValue)],
        content: Option<&str>,
    ) -> String;
}

/// Minimal HTML renderer: `<name attrs>content</name>`, always closed.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlTagRenderer;

impl TagRenderer for HtmlTagRenderer {
    fn content_tag(
        &self,
        name: &str,
        attributes: &[(String, RenderedValue)],
        content: Option<&str>,
    ) -> String {
        let mut out = format!("<{name}");
        if !attributes.is_empty() {
            out.push(' ');
            out.push_str(&render::write_pairs(attributes, escape_html));
        }
        out.push('>');
        if let Some(content) = content {
            out.push_str(&escape_html(content));
        }
        out.push_str("</");
        out.push_str(name);
        out.push('>');
        out
    }
}

/// A base attribute tree bound to a renderer.
pub struct AttributeMerger<'r, R: ?Sized> {
    renderer: &'r R,
    attributes: AttributeTree,
    options: RenderOptions,
}

impl<'r, R: TagRenderer + ?Sized> AttributeMerger<'r, R> {
    pub fn new(renderer: &'r R, attributes: AttributeTree) -> Self {
        Self {
            renderer,
            attributes,
            options: RenderOptions::default(),
        }
    }

    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn attributes(&self) -> &AttributeTree {
        &self.attributes
    }

    pub fn renderer(&self) -> &'r R {
        self.renderer
    }

    /// The base attributes merged with `other`.
    pub fn merge(&self, other: &AttributeTree) -> AttributeTree {
        self.attributes.merge_with(other, NamePolicy::global())
    }

    /// A new merger whose base is this one's merged with `other`.
    pub fn with_attributes(&self, other: &AttributeTree) -> AttributeMerger<'r, R> {
        AttributeMerger {
            renderer: self.renderer,
            attributes: self.merge(other),
            options: self.options,
        }
    }

    /// Renders a `name` element with the base attributes merged with `overrides`.
    pub fn tag(&self, name: &str, overrides: &AttributeTree, content: Option<&str>) -> String {
        let attributes = self.merge(overrides);
        let pairs = flatten_to_pairs_with(&attributes, &self.options);
        self.renderer.content_tag(name, &pairs, content)
    }

    /// Calls `f` with the renderer and the base attributes merged with `overrides`.
    pub fn forward<T, F>(&self, overrides: &AttributeTree, f: F) -> T
    where
        F: FnOnce(&R, &AttributeTree) -> T,
    {
        f(self.renderer, &self.merge(overrides))
    }
}

impl<R: ?Sized> Clone for AttributeMerger<'_, R> {
    fn clone(&self) -> Self {
        Self {
            renderer: self.renderer,
            attributes: self.attributes.clone(),
            options: self.options,
        }
    }
}

impl<R: ?Sized> fmt::Debug for AttributeMerger<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeMerger")
            .field("attributes", &self.attributes)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<R: ?Sized> fmt::Display for AttributeMerger<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render::serialize_with(
            &self.attributes,
            &self.options,
            escape_html,
        ))
    }
}
