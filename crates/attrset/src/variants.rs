//! # Variant Registry
//!
//! Design systems usually describe a component as a base set of attributes
//! plus named variations: a `button` with `primary` and `secondary` styles, a
//! `rounded` modifier, and so on. The registry stores those definitions once
//! and hands out [`Builder`]s that merge the requested variants into the base.
//!
//! ```
//! use attrset::attributes::AttributeTree;
//! use attrset::variants::VariantRegistry;
//! use serde_json::json;
//!
//! let mut registry = VariantRegistry::new();
//! registry
//!     .define("button", AttributeTree::from_value(&json!({"class": "rounded"})))?
//!     .tag_name("button")
//!     .group("style", "primary", AttributeTree::from_value(&json!({"class": "bg-green-500"})))?
//!     .variant("wide", AttributeTree::from_value(&json!({"class": "w-full"})))?;
//!
//! let button = registry.builder("button")?.with(&["primary", "wide"])?;
//! assert_eq!(button.to_string(), r#"class="rounded bg-green-500 w-full""#);
//! # Ok::<(), attrset::AttrsError>(())
//! ```
//!
//! ## Naming Rules
//!
//! Names are validated when they are registered, never at lookup time:
//! - A base name must be unique within the registry.
//! - A variant name must be unique within its base, across anonymous
//!   variants and every group.
//! - No name may shadow one of the builder operations ([`RESERVED_NAMES`]).

use crate::attributes::AttributeTree;
use crate::error::{AttrsError, Result};
use crate::merger::{AttributeMerger, TagRenderer};
use crate::render::{flatten_to_pairs, serialize};
use indexmap::IndexMap;
use std::fmt;

/// Element rendered by a base that does not pick one.
pub const DEFAULT_TAG_NAME: &str = "div";

/// Operation names that variants and bases cannot take.
pub const RESERVED_NAMES: &[&str] = &[
    "attributes",
    "merge",
    "tag",
    "to_string",
    "variant",
    "with",
    "with_attributes",
    "with_group",
];

fn check_reserved(name: &str) -> Result<()> {
    if RESERVED_NAMES.contains(&name) {
        return Err(AttrsError::NameCollision {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// A named base with its variants.
#[derive(Debug, Clone)]
pub struct BaseDefinition {
    name: String,
    tag_name: String,
    attributes: AttributeTree,
    variants: IndexMap<String, AttributeTree>,
    groups: IndexMap<String, IndexMap<String, AttributeTree>>,
}

impl BaseDefinition {
    fn new(name: &str, attributes: AttributeTree) -> Self {
        Self {
            name: name.to_string(),
            tag_name: DEFAULT_TAG_NAME.to_string(),
            attributes,
            variants: IndexMap::new(),
            groups: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &AttributeTree {
        &self.attributes
    }

    /// Sets the element this base renders as.
    pub fn tag_name(&mut self, tag_name: &str) -> &mut Self {
        self.tag_name = tag_name.to_string();
        self
    }

    fn is_taken(&self, name: &str) -> bool {
        self.variants.contains_key(name) || self.groups.values().any(|g| g.contains_key(name))
    }

    /// Registers an anonymous variant, looked up by name alone.
    pub fn variant(&mut self, name: &str, attributes: AttributeTree) -> Result<&mut Self> {
        check_reserved(name)?;
        if self.is_taken(name) || self.groups.contains_key(name) {
            return Err(AttrsError::NameCollision {
                name: name.to_string(),
            });
        }
        tracing::debug!(base = %self.name, variant = name, "registered variant");
        self.variants.insert(name.to_string(), attributes);
        Ok(self)
    }

    /// Registers a variant inside `group` (e.g. `style: primary`).
    pub fn group(&mut self, group: &str, name: &str, attributes: AttributeTree) -> Result<&mut Self> {
        check_reserved(group)?;
        check_reserved(name)?;
        if self.is_taken(group) {
            return Err(AttrsError::NameCollision {
                name: group.to_string(),
            });
        }
        if self.is_taken(name) || self.groups.contains_key(name) {
            return Err(AttrsError::NameCollision {
                name: name.to_string(),
            });
        }
        tracing::debug!(base = %self.name, group, variant = name, "registered grouped variant");
        self.groups
            .entry(group.to_string())
            .or_default()
            .insert(name.to_string(), attributes);
        Ok(self)
    }

    fn lookup(&self, name: &str) -> Option<&AttributeTree> {
        self.variants
            .get(name)
            .or_else(|| self.groups.values().find_map(|g| g.get(name)))
    }

    fn lookup_in_group(&self, group: &str, name: &str) -> Option<&AttributeTree> {
        self.groups.get(group)?.get(name)
    }
}

/// Registry of named bases.
#[derive(Debug, Clone, Default)]
pub struct VariantRegistry {
    bases: IndexMap<String, BaseDefinition>,
}

impl VariantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a base. Fails if the name is taken or reserved.
    pub fn define(&mut self, name: &str, attributes: AttributeTree) -> Result<&mut BaseDefinition> {
        check_reserved(name)?;
        if self.bases.contains_key(name) {
            return Err(AttrsError::NameCollision {
                name: name.to_string(),
            });
        }
        tracing::debug!(base = name, "registered base");
        let entry = self
            .bases
            .entry(name.to_string())
            .or_insert_with(|| BaseDefinition::new(name, attributes));
        Ok(entry)
    }

    pub fn get(&self, name: &str) -> Option<&BaseDefinition> {
        self.bases.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bases.keys().map(String::as_str)
    }

    /// A builder seeded with the base's attributes.
    pub fn builder(&self, name: &str) -> Result<Builder<'_>> {
        let definition = self
            .bases
            .get(name)
            .ok_or_else(|| AttrsError::UnknownVariant(name.to_string()))?;
        Ok(Builder {
            definition,
            attributes: definition.attributes.clone(),
        })
    }
}

/// Attributes derived from one base. Every operation returns a new builder.
#[derive(Debug, Clone)]
pub struct Builder<'a> {
    definition: &'a BaseDefinition,
    attributes: AttributeTree,
}

impl<'a> Builder<'a> {
    fn derive(&self, attributes: AttributeTree) -> Builder<'a> {
        Builder {
            definition: self.definition,
            attributes,
        }
    }

    /// Merges each named variant in order. Blank names are skipped.
    pub fn with<S: AsRef<str>>(&self, names: &[S]) -> Result<Builder<'a>> {
        let mut attributes = self.attributes.clone();
        for name in names {
            let name: &str = name.as_ref();
            if name.trim().is_empty() {
                continue;
            }
            let variant = self
                .definition
                .lookup(name)
                .ok_or_else(|| AttrsError::UnknownVariant(name.to_string()))?;
            attributes = attributes.merge(variant);
        }
        Ok(self.derive(attributes))
    }

    /// Merges one variant.
    pub fn variant(&self, name: &str) -> Result<Builder<'a>> {
        self.with(&[name])
    }

    /// Merges the variant `name` from `group`.
    pub fn with_group(&self, group: &str, name: &str) -> Result<Builder<'a>> {
        let variant = self
            .definition
            .lookup_in_group(group, name)
            .ok_or_else(|| AttrsError::UnknownVariant(format!("{group}: {name}")))?;
        Ok(self.derive(self.attributes.merge(variant)))
    }

    /// Merges ad-hoc attributes.
    pub fn merge(&self, other: &AttributeTree) -> Builder<'a> {
        self.derive(self.attributes.merge(other))
    }

    pub fn attributes(&self) -> &AttributeTree {
        &self.attributes
    }

    pub fn tag_name(&self) -> &str {
        &self.definition.tag_name
    }

    /// Renders the base's element.
    pub fn tag<R: TagRenderer + ?Sized>(&self, renderer: &R, content: Option<&str>) -> String {
        renderer.content_tag(self.tag_name(), &flatten_to_pairs(&self.attributes), content)
    }

    /// Binds these attributes to a renderer for use with other elements.
    pub fn merger<'r, R: TagRenderer + ?Sized>(&self, renderer: &'r R) -> AttributeMerger<'r, R> {
        AttributeMerger::new(renderer, self.attributes.clone())
    }
}

impl fmt::Display for Builder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize(&self.attributes))
    }
}
