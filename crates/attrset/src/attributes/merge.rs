//! Merge engine.
//!
//! Merging is right-biased and never mutates either operand:
//!
//! | base | override | result |
//! |------|----------|--------|
//! | tree | tree | recursive merge |
//! | tokens | tokens | union, base tokens first |
//! | tokens | string/number | union with the normalized scalar |
//! | string/number | tokens | union with the normalized scalar first |
//! | anything else | | override wins |
//!
//! Keys marked with the override marker in `overrides` skip the table and
//! replace whatever `base` held. New keys append after all of `base`'s keys.

use super::policy::NamePolicy;
use super::tree::{canonical_key, settle_value, wrap_leaf, AttributeTree};
use super::value::AttrValue;
use crate::tokens::TokenSet;

/// Merges `overrides` into a copy of `base`.
pub fn merge(base: &AttributeTree, overrides: &AttributeTree, policy: &NamePolicy) -> AttributeTree {
    merge_at(base, overrides, &mut Vec::new(), policy)
}

/// `namespace` is the path from the root to the trees being merged.
fn merge_at(
    base: &AttributeTree,
    overrides: &AttributeTree,
    namespace: &mut Vec<String>,
    policy: &NamePolicy,
) -> AttributeTree {
    if overrides.is_empty() {
        return base.settled();
    }

    let mut entries = base.settled().entries().clone();
    for (raw_name, value) in overrides.entries() {
        let marked = overrides.is_marked_for_replace(raw_name);
        let name = canonical_key(namespace.as_slice(), raw_name).into_owned();
        let value = wrap_leaf(value.clone(), namespace.as_slice(), &name, policy);

        if marked {
            tracing::trace!(%name, "override marker replaces value");
            entries.insert(name, settle_value(&value));
            continue;
        }

        let merged = match entries.get(&name) {
            Some(existing) => {
                namespace.push(name.clone());
                let merged = combine_values(existing, &value, namespace, policy);
                namespace.pop();
                merged
            }
            None => settle_value(&value),
        };
        entries.insert(name, merged);
    }
    AttributeTree::from_entries(entries)
}

/// Combines two values stored under the same name.
///
/// `path` is the full path to the value, used as the namespace when both
/// sides are trees.
pub(crate) fn combine_values(
    base: &AttrValue,
    over: &AttrValue,
    path: &mut Vec<String>,
    policy: &NamePolicy,
) -> AttrValue {
    match (base, over) {
        (AttrValue::Tree(a), AttrValue::Tree(b)) => AttrValue::Tree(merge_at(a, b, path, policy)),
        (AttrValue::Tokens(a), AttrValue::Tokens(b)) => AttrValue::Tokens(a.union(b)),
        (AttrValue::Tokens(a), AttrValue::Scalar(s)) if s.is_token_source() => {
            AttrValue::Tokens(a.union_value(&s.to_json()))
        }
        (AttrValue::Scalar(s), AttrValue::Tokens(b)) if s.is_token_source() => {
            AttrValue::Tokens(TokenSet::normalize(&s.to_json()).union(b))
        }
        (_, over) => settle_value(over),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Scalar;
    use serde_json::{json, Value};

    fn build(raw: Value) -> AttributeTree {
        AttributeTree::build(&raw, &NamePolicy::builtin())
    }

    fn merged(base: Value, overrides: Value) -> AttributeTree {
        merge(&build(base), &build(overrides), &NamePolicy::builtin())
    }

    fn tokens_at(tree: &AttributeTree, path: &[&str]) -> String {
        tree.get_path(path)
            .and_then(AttrValue::as_tokens)
            .map(TokenSet::render)
            .unwrap_or_default()
    }

    #[test]
    fn test_token_lists_union() {
        let tree = merged(json!({"class": "one"}), json!({"class": "two"}));
        assert_eq!(tokens_at(&tree, &["class"]), "one two");
    }

    #[test]
    fn test_union_drops_duplicates() {
        let tree = merged(json!({"class": "one"}), json!({"class": "one two"}));
        assert_eq!(tokens_at(&tree, &["class"]), "one two");
    }

    #[test]
    fn test_nested_trees_merge_recursively() {
        let tree = merged(
            json!({"data": {"controller": "one", "id": 1}}),
            json!({"data": {"controller": "two", "value": "x"}}),
        );
        assert_eq!(tokens_at(&tree, &["data", "controller"]), "one two");
        let data = tree.get("data").and_then(AttrValue::as_tree).unwrap();
        assert_eq!(data.keys().collect::<Vec<_>>(), vec!["controller", "id", "value"]);
    }

    #[test]
    fn test_deep_nesting_has_no_fixed_limit() {
        let tree = merged(
            json!({"a": {"b": {"c": {"d": {"class": "x"}}}}}),
            json!({"a": {"b": {"c": {"d": {"class": "y"}}}}}),
        );
        assert_eq!(tokens_at(&tree, &["a", "b", "c", "d", "class"]), "x y");
    }

    #[test]
    fn test_scalars_are_right_biased() {
        let a = json!({"id": "left"});
        let b = json!({"id": "right"});
        assert_eq!(merged(a.clone(), b.clone()).get("id").unwrap().as_str(), Some("right"));
        assert_eq!(merged(b, a).get("id").unwrap().as_str(), Some("left"));
    }

    #[test]
    fn test_type_mismatch_resolves_to_override() {
        let tree = merged(json!({"data": {"x": 1}}), json!({"data": "flat"}));
        assert_eq!(tree.get("data").unwrap().as_str(), Some("flat"));

        let tree = merged(json!({"id": "flat"}), json!({"id": {"nested": true}}));
        assert!(tree.get("id").unwrap().as_tree().is_some());
    }

    #[test]
    fn test_override_marker_replaces_token_list() {
        let tree = merged(json!({"class": "default"}), json!({"class!": "override"}));
        assert_eq!(tokens_at(&tree, &["class"]), "override");
        assert!(tree.get("class!").is_none());
        assert!(!tree.is_marked_for_replace("class"));
    }

    #[test]
    fn test_override_marker_replaces_nested_tree_entirely() {
        let tree = merged(
            json!({"data": {"controller": "a", "id": 1}}),
            json!({"data!": {"controller": "b"}}),
        );
        let data = tree.get("data").and_then(AttrValue::as_tree).unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(tokens_at(&tree, &["data", "controller"]), "b");
    }

    #[test]
    fn test_override_marker_inside_namespace() {
        let tree = merged(
            json!({"data": {"controller": "a", "action": "x"}}),
            json!({"data": {"controller!": "b", "action": "y"}}),
        );
        assert_eq!(tokens_at(&tree, &["data", "controller"]), "b");
        assert_eq!(tokens_at(&tree, &["data", "action"]), "x y");
    }

    #[test]
    fn test_override_marker_is_consumed_by_one_merge() {
        let policy = NamePolicy::builtin();
        let step = merged(json!({"class": "a"}), json!({"class!": "b"}));
        let next = merge(&step, &build(json!({"class": "c"})), &policy);
        assert_eq!(tokens_at(&next, &["class"]), "b c");
    }

    #[test]
    fn test_flag_map_override_unions_with_class_string() {
        let tree = merged(json!({"class": "btn"}), json!({"class": {"active": true, "off": false}}));
        assert_eq!(tokens_at(&tree, &["class"]), "btn active");

        let tree = merged(json!({"class": {"active": true}}), json!({"class": "btn"}));
        assert_eq!(tokens_at(&tree, &["class"]), "active btn");
    }

    #[test]
    fn test_flag_map_under_nested_token_list_merges() {
        let tree = merged(
            json!({"data": {"controller": "modal"}}),
            json!({"data": {"controller": {"tooltip": true, "modal": false}}}),
        );
        assert_eq!(tokens_at(&tree, &["data", "controller"]), "modal tooltip");
    }

    #[test]
    fn test_typed_flag_tree_override_is_read_as_tokens() {
        let policy = NamePolicy::builtin();
        let flags = AttributeTree::from_pairs([("active", true)], &NamePolicy::empty());
        let over = AttributeTree::from_pairs([("class", flags)], &NamePolicy::empty());
        assert!(over.get("class").unwrap().as_tree().is_some());

        let tree = merge(&build(json!({"class": "btn"})), &over, &policy);
        assert_eq!(tokens_at(&tree, &["class"]), "btn active");
    }

    #[test]
    fn test_equivalent_nested_spellings_merge_into_one_key() {
        let tree = merged(
            json!({"data": {"turbo_frame": "a", "search_target": "x"}}),
            json!({"data": {"turbo-frame": "b", "search-target": "y"}}),
        );
        let data = tree.get("data").and_then(AttrValue::as_tree).unwrap();
        assert_eq!(data.keys().collect::<Vec<_>>(), vec!["turbo-frame", "search-target"]);
        assert_eq!(data.get("turbo-frame").unwrap().as_str(), Some("b"));
        assert_eq!(tokens_at(&tree, &["data", "search-target"]), "x y");
    }

    #[test]
    fn test_new_keys_append_after_base_keys() {
        let tree = merged(json!({"id": 1, "class": "a"}), json!({"href": "/", "id": 2}));
        assert_eq!(tree.keys().collect::<Vec<_>>(), vec!["id", "class", "href"]);
    }

    #[test]
    fn test_empty_overrides_are_identity() {
        let base = build(json!({"id": 1, "class": "a b", "data": {"controller": "x"}}));
        let result = merge(&base, &AttributeTree::new(), &NamePolicy::builtin());
        assert_eq!(result, base);
    }

    #[test]
    fn test_operands_are_not_mutated() {
        let base = build(json!({"class": "base", "id": "x"}));
        let left = build(json!({"class": "left"}));
        let right = build(json!({"class": "right", "href": "/"}));
        let policy = NamePolicy::builtin();

        let a = merge(&base, &left, &policy);
        let b = merge(&base, &right, &policy);

        assert_eq!(tokens_at(&base, &["class"]), "base");
        assert_eq!(base.len(), 2);
        assert_eq!(tokens_at(&a, &["class"]), "base left");
        assert_eq!(tokens_at(&b, &["class"]), "base right");
        assert!(!a.contains_key("href"));
    }

    #[test]
    fn test_explicit_token_set_unions_with_unlisted_scalar() {
        let policy = NamePolicy::empty();
        let base = AttributeTree::from_pairs([("rel", TokenSet::parse("a"))], &policy);
        let over = AttributeTree::from_pairs([("rel", "b c")], &policy);
        let tree = merge(&base, &over, &policy);
        assert_eq!(tokens_at(&tree, &["rel"]), "a b c");

        let tree = merge(&over, &base, &policy);
        assert_eq!(tokens_at(&tree, &["rel"]), "b c a");
    }

    #[test]
    fn test_boolean_replaces_explicit_token_set() {
        let policy = NamePolicy::empty();
        let base = AttributeTree::from_pairs([("rel", TokenSet::parse("a"))], &policy);
        let over = AttributeTree::from_pairs([("rel", false)], &policy);
        let tree = merge(&base, &over, &policy);
        assert_eq!(tree.get("rel"), Some(&AttrValue::Scalar(Scalar::Bool(false))));
    }

    #[test]
    fn test_policy_wraps_new_scalar_keys() {
        let policy = NamePolicy::builtin();
        let over = AttributeTree::from_pairs([("rel", "a b"), ("id", "x")], &NamePolicy::empty());
        assert!(over.get("rel").unwrap().as_tokens().is_none());
        let tree = merge(&AttributeTree::new(), &over, &policy);
        assert_eq!(tokens_at(&tree, &["rel"]), "a b");
        assert_eq!(tree.get("id").unwrap().as_str(), Some("x"));
    }
}
