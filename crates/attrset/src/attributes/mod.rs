//! # Attribute System
//!
//! This module models a full set of element attributes as an immutable tree
//! and combines trees with token-list aware merge rules. Instead of treating
//! every attribute value as an opaque string, the attribute system provides:
//!
//! - **Value kinds**: scalars, token sets and nested namespaces (`data`, `aria`)
//! - **A name policy**: which names combine as token lists (`class`, `rel`, ...)
//! - **Deep merging**: right-biased, order preserving, with `!` override markers
//!
//! ## Value Kinds
//!
//! | Kind | Examples | Merge behavior |
//! |------|----------|----------------|
//! | `Scalar` | `id`, `href`, `hidden` | Later value replaces earlier |
//! | `Tokens` | `class`, `data-controller` | Union, first occurrence wins |
//! | `Tree` | `data: {...}`, `aria: {...}` | Merged key by key |
//!
//! ## Usage
//!
//! ```
//! use attrset::attributes::AttributeTree;
//! use serde_json::json;
//!
//! let base = AttributeTree::from_value(&json!({"class": "btn", "data": {"controller": "a"}}));
//! let primary = base.merge_value(&json!({"class": "btn-primary", "data": {"controller": "b"}}));
//!
//! assert_eq!(primary.to_string(), r#"class="btn btn-primary" data-controller="a b""#);
//! assert_eq!(base.to_string(), r#"class="btn" data-controller="a""#);
//! ```

pub mod merge;
pub mod policy;
mod tree;
mod value;

pub use merge::merge;
pub use policy::{dasherize, NamePolicy, DEFAULT_TOKEN_LISTS, DEFAULT_TOKEN_LIST_PATTERNS};
pub use tree::{split_marker, AttributeTree, OVERRIDE_MARKER};
pub use value::{AttrValue, Scalar};
