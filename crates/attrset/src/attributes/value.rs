//! Attribute value types.
//!
//! Every entry of an [`AttributeTree`] holds one of three kinds of value:
//! a [`Scalar`], a [`TokenSet`], or another (nested) tree.

use super::AttributeTree;
use crate::tokens::TokenSet;
use serde_json::{Number, Value};

/// A single opaque value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),

    /// Arrays and other structures outside the tree model.
    ///
    /// These render as JSON text.
    Structured(Value),
}

impl Scalar {
    /// Converts a raw, non-object value.
    ///
    /// Objects are nested trees and never reach this point through the
    /// tree constructors; one passed here directly is kept as `Structured`.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Scalar::Null,
            Value::Bool(b) => Scalar::Bool(*b),
            Value::Number(n) => Scalar::Number(n.clone()),
            Value::String(s) => Scalar::String(s.clone()),
            other => Scalar::Structured(other.clone()),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Scalar::Null => Value::Null,
            Scalar::Bool(b) => Value::Bool(*b),
            Scalar::Number(n) => Value::Number(n.clone()),
            Scalar::String(s) => Value::String(s.clone()),
            Scalar::Structured(v) => v.clone(),
        }
    }

    /// Whether this value can be read as tokens when combined with a token set.
    ///
    /// Booleans and null cannot: combining them replaces the token set.
    pub fn is_token_source(&self) -> bool {
        matches!(
            self,
            Scalar::Number(_) | Scalar::String(_) | Scalar::Structured(_)
        )
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }
}

/// A value stored under an attribute name.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Scalar(Scalar),
    Tokens(TokenSet),
    Tree(AttributeTree),
}

impl AttrValue {
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            AttrValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_tokens(&self) -> Option<&TokenSet> {
        match self {
            AttrValue::Tokens(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_tree(&self) -> Option<&AttributeTree> {
        match self {
            AttrValue::Tree(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Scalar::as_str)
    }

    /// Plain JSON form: token sets as strings, trees as objects.
    pub fn to_json(&self) -> Value {
        match self {
            AttrValue::Scalar(s) => s.to_json(),
            AttrValue::Tokens(t) => Value::from(t),
            AttrValue::Tree(t) => Value::Object(t.to_flat_mapping()),
        }
    }
}

impl From<Scalar> for AttrValue {
    fn from(value: Scalar) -> Self {
        AttrValue::Scalar(value)
    }
}

impl From<TokenSet> for AttrValue {
    fn from(value: TokenSet) -> Self {
        AttrValue::Tokens(value)
    }
}

impl From<AttributeTree> for AttrValue {
    fn from(value: AttributeTree) -> Self {
        AttrValue::Tree(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Scalar(Scalar::String(value.to_string()))
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Scalar(Scalar::String(value))
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Scalar(Scalar::Bool(value))
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Scalar(Scalar::Number(value.into()))
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Scalar(Scalar::Number(value.into()))
    }
}

impl From<u64> for AttrValue {
    fn from(value: u64) -> Self {
        AttrValue::Scalar(Scalar::Number(value.into()))
    }
}

impl From<f64> for AttrValue {
    /// Non-finite floats have no JSON form and become `Null`.
    fn from(value: f64) -> Self {
        AttrValue::Scalar(Number::from_f64(value).map_or(Scalar::Null, Scalar::Number))
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(AttrValue::Scalar(Scalar::Null), Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_from_json_keeps_kind() {
        assert_eq!(Scalar::from_json(&json!(null)), Scalar::Null);
        assert_eq!(Scalar::from_json(&json!(true)), Scalar::Bool(true));
        assert_eq!(Scalar::from_json(&json!(3)), Scalar::Number(3.into()));
        assert_eq!(Scalar::from_json(&json!("x")), Scalar::String("x".into()));
        assert_eq!(
            Scalar::from_json(&json!([1, 2])),
            Scalar::Structured(json!([1, 2]))
        );
    }

    #[test]
    fn test_token_sources() {
        assert!(Scalar::String("a".into()).is_token_source());
        assert!(Scalar::Number(1.into()).is_token_source());
        assert!(!Scalar::Bool(true).is_token_source());
        assert!(!Scalar::Null.is_token_source());
    }

    #[test]
    fn test_accessors_match_variant() {
        let tokens = AttrValue::from(TokenSet::parse("a b"));
        assert_eq!(tokens.as_tokens().map(TokenSet::len), Some(2));
        assert!(tokens.as_scalar().is_none());
        assert!(tokens.as_tree().is_none());

        let text = AttrValue::from("hello");
        assert_eq!(text.as_str(), Some("hello"));
    }

    #[test]
    fn test_to_json_renders_token_sets_as_strings() {
        assert_eq!(AttrValue::from(TokenSet::parse("a b")).to_json(), json!("a b"));
        assert_eq!(AttrValue::from(42).to_json(), json!(42));
    }

    #[test]
    fn test_option_none_is_null() {
        assert_eq!(
            AttrValue::from(None::<&str>),
            AttrValue::Scalar(Scalar::Null)
        );
        assert_eq!(AttrValue::from(Some("x")).as_str(), Some("x"));
    }

    #[test]
    fn test_non_finite_float_is_null() {
        assert_eq!(AttrValue::from(f64::NAN), AttrValue::Scalar(Scalar::Null));
    }
}
