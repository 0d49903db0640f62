//! Token lists for space-separated attribute values.
//!
//! Attributes such as `class`, `rel` or `aria-describedby` hold a list of
//! whitespace-free tokens rather than a single opaque string. A [`TokenSet`]
//! keeps those tokens ordered by first insertion and free of duplicates, so
//! combining `"btn btn-lg"` with `"btn primary"` yields `"btn btn-lg primary"`.
//!
//! ## Normalization Rules
//!
//! [`TokenSet::normalize`] accepts any attribute-shaped value:
//!
//! | Input | Tokens |
//! |-------|--------|
//! | `"one two"` | split on runs of whitespace |
//! | `["one", ["two"]]` | each element normalized, in order |
//! | `{"one": true, "two": false}` | keys whose flag is truthy |
//! | `123` | `"123"` |
//! | `null`, `false` | nothing |
//!
//! A flag is truthy unless it is `null` or `false`.

use indexmap::IndexSet;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// An ordered, deduplicated list of tokens.
///
/// Iteration order is first-insertion order across every input that built
/// the set, and equality compares that order too.
#[derive(Debug, Clone, Default)]
pub struct TokenSet {
    tokens: IndexSet<String>,
}

impl TokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits `text` on whitespace into a token set.
    pub fn parse(text: &str) -> Self {
        let mut tokens = IndexSet::new();
        push_split(text, &mut tokens);
        Self { tokens }
    }

    /// Normalizes an arbitrary attribute value into a token set.
    pub fn normalize(value: &Value) -> Self {
        let mut tokens = IndexSet::new();
        collect(value, &mut tokens);
        Self { tokens }
    }

    /// Returns a new set holding this set's tokens followed by `other`'s.
    pub fn union(&self, other: &TokenSet) -> TokenSet {
        let mut tokens = self.tokens.clone();
        tokens.extend(other.tokens.iter().cloned());
        TokenSet { tokens }
    }

    /// Like [`TokenSet::union`], normalizing `other` first.
    pub fn union_value(&self, other: &Value) -> TokenSet {
        let mut tokens = self.tokens.clone();
        collect(other, &mut tokens);
        TokenSet { tokens }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Tokens joined by a single space. Empty sets render as `""`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(token);
        }
        out
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.tokens.iter().cloned().collect()
    }
}

fn push_split(text: &str, tokens: &mut IndexSet<String>) {
    for token in text.split_whitespace() {
        if !tokens.contains(token) {
            tokens.insert(token.to_string());
        }
    }
}

fn collect(value: &Value, tokens: &mut IndexSet<String>) {
    match value {
        Value::Null | Value::Bool(false) => {}
        Value::Bool(true) => push_split("true", tokens),
        Value::Number(n) => push_split(&n.to_string(), tokens),
        Value::String(s) => push_split(s, tokens),
        Value::Array(items) => {
            for item in items {
                collect(item, tokens);
            }
        }
        Value::Object(flags) => {
            for (token, flag) in flags {
                if is_truthy(flag) {
                    push_split(token, tokens);
                }
            }
        }
    }
}

/// `null` and `false` are falsy, everything else is truthy.
pub fn is_truthy(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}

/// Normalizes several values into one token set, in argument order.
///
/// ```
/// use attrset::tokens::token_list;
/// use serde_json::json;
///
/// let tokens = token_list([json!("song"), json!({"play": true, "pause": false})]);
/// assert_eq!(tokens.render(), "song play");
/// ```
pub fn token_list<I>(values: I) -> TokenSet
where
    I: IntoIterator<Item = Value>,
{
    let mut tokens = IndexSet::new();
    for value in values {
        collect(&value, &mut tokens);
    }
    TokenSet { tokens }
}

/// Alias of [`token_list`], named after its most common use.
pub fn class_names<I>(values: I) -> TokenSet
where
    I: IntoIterator<Item = Value>,
{
    token_list(values)
}

impl PartialEq for TokenSet {
    fn eq(&self, other: &Self) -> bool {
        self.tokens.iter().eq(other.tokens.iter())
    }
}

impl Eq for TokenSet {}

impl fmt::Display for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<&str> for TokenSet {
    fn from(text: &str) -> Self {
        TokenSet::parse(text)
    }
}

impl From<String> for TokenSet {
    fn from(text: String) -> Self {
        TokenSet::parse(&text)
    }
}

impl<S: AsRef<str>> FromIterator<S> for TokenSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut tokens = IndexSet::new();
        for item in iter {
            push_split(item.as_ref(), &mut tokens);
        }
        TokenSet { tokens }
    }
}

impl From<&TokenSet> for Value {
    fn from(tokens: &TokenSet) -> Self {
        Value::String(tokens.render())
    }
}

impl Serialize for TokenSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.render())
    }
}
