//! # Attrset Architecture
//!
//! Attrset merges sets of HTML element attributes the way component libraries
//! need them merged. A `class` list is not an opaque string: merging
//! `class="btn"` with `class="btn-primary"` should produce `class="btn btn-primary"`,
//! while merging `id="a"` with `id="b"` should produce `id="b"`.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Composition (merger.rs, variants.rs)                       │
//! │  - Base attributes bound to a renderer                      │
//! │  - Named bases with variants, resolved by a Builder         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Serialization (render.rs)                                  │
//! │  - Tree → ordered (name, value) pairs → name="value" text   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Attribute Engine (attributes/, tokens.rs)                  │
//! │  - Immutable trees, token sets, the name policy             │
//! │  - Pure, right-biased deep merge                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Values In, Values Out
//!
//! Merging never mutates its inputs and never fails. Every merge returns a new
//! tree, so one base tree can seed any number of variations. The only
//! fallible operations are registration (patterns, variants), configuration
//! loading and parsing raw JSON text.
//!
//! ## Module Overview
//!
//! - [`tokens`]: Ordered, deduplicated token sets and the `token_list` helper
//! - [`attributes`]: Trees, values, the name policy and the merge engine
//! - [`render`]: Flattening and serialization
//! - [`merger`]: The renderer capability and [`merger::AttributeMerger`]
//! - [`variants`]: Named bases and variants
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod attributes;
pub mod config;
pub mod error;
pub mod merger;
pub mod render;
pub mod tokens;
pub mod variants;

pub use attributes::{AttrValue, AttributeTree, NamePolicy, Scalar};
pub use error::{AttrsError, Result};
pub use tokens::{class_names, token_list, TokenSet};
