//! # Rendering Module
//!
//! Turns library results into the text the CLI prints. Nothing here touches
//! stdout; handlers return the rendered strings and `commands.rs` prints them.

use super::setup::OutputFormat;
use anyhow::Result;
use attrset::render::{escape_html, flatten_to_pairs_with, serialize_with, RenderOptions};
use attrset::AttributeTree;

/// Renders a merged tree in the requested format.
pub fn render_tree(tree: &AttributeTree, format: OutputFormat, options: &RenderOptions) -> Result<String> {
    let rendered = match format {
        OutputFormat::String => serialize_with(tree, options, escape_html),
        OutputFormat::Pairs => flatten_to_pairs_with(tree, options)
            .iter()
            .map(|(name, value)| format!("{name}={}", value.text_for(name)))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => serde_json::to_string_pretty(tree)?,
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use attrset::NamePolicy;
    use serde_json::json;

    fn sample() -> AttributeTree {
        AttributeTree::build(
            &json!({"class": ["a", "b"], "title": "x<y", "data": {"controller": "c"}, "hidden": true}),
            &NamePolicy::builtin(),
        )
    }

    #[test]
    fn test_string_format_escapes() {
        let out = render_tree(&sample(), OutputFormat::String, &RenderOptions::default()).unwrap();
        assert_eq!(
            out,
            r#"class="a b" title="x&lt;y" data-controller="c" hidden="hidden""#
        );
    }

    #[test]
    fn test_pairs_format_is_one_per_line() {
        let out = render_tree(&sample(), OutputFormat::Pairs, &RenderOptions::default()).unwrap();
        assert_eq!(
            out,
            "class=a b\ntitle=x<y\ndata-controller=c\nhidden=hidden"
        );
    }

    #[test]
    fn test_json_format_keeps_nesting() {
        let out = render_tree(&sample(), OutputFormat::Json, &RenderOptions::default()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            parsed,
            json!({"class": "a b", "title": "x<y", "data": {"controller": "c"}, "hidden": true})
        );
    }
}
