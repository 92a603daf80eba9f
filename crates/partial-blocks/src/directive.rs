//! Directive parsing for opening annotations.
//!
//! An opening annotation reads
//!
//! ```text
//! <!-- extract:teaser/content-teaser--small.html brand:example wrap:<ul>:</ul> -->
//! ```
//!
//! and parses into an ordered map:
//!
//! ```text
//! extract => "teaser/content-teaser--small.html"
//! brand   => "example"
//! wrap    => ["<ul>", "</ul>"]
//! ```
//!
//! Directives are whitespace-separated `key:value` tokens, so values cannot
//! contain spaces. Any further `:` inside a value splits it into a list.
//! There is no escape for a literal colon.

use crate::wrap::WrapPair;
use regex::Regex;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use std::sync::LazyLock;

/// Key of the mandatory destination directive.
pub const EXTRACT_KEY: &str = "extract";

/// Character that splits a directive value into a list.
pub const LIST_SEPARATOR: char = ':';

static DIRECTIVE_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_-]+):(.*)$").expect("Invalid directive token regex")
});

/// Value bound to a directive key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DirectiveValue {
    Text(String),
    List(Vec<String>),
    /// Only produced by block processing, once `wrap` is formalized.
    Wrap(WrapPair),
}

impl DirectiveValue {
    /// Plain-text view of the value; lists are re-joined with `:`.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text.clone()),
            Self::List(items) => Some(items.join(&LIST_SEPARATOR.to_string())),
            Self::Wrap(_) => None,
        }
    }
}

/// Directives of one annotation, in the order they were written.
///
/// Keys are unique; writing a key twice keeps its first position and the
/// last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives {
    entries: Vec<(String, DirectiveValue)>,
}

impl Directives {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the text of an opening annotation.
    ///
    /// Comment delimiters are optional. A key written with an empty value
    /// (`extract: box/card.html`) takes the next bare token as its value.
    /// Bare tokens with no pending key are ignored. Unknown keys are kept.
    ///
    /// # Example
    /// ```
    /// use partial_blocks::directive::{DirectiveValue, Directives};
    ///
    /// let directives = Directives::parse("<!-- extract:box/card.html wrap:<b>:</b> -->");
    /// assert_eq!(directives.destination(), Some("box/card.html"));
    /// assert_eq!(
    ///     directives.get("wrap"),
    ///     Some(&DirectiveValue::List(vec!["<b>".into(), "</b>".into()]))
    /// );
    /// ```
    pub fn parse(annotation: &str) -> Self {
        let body = annotation.trim();
        let body = body.strip_prefix("<!--").unwrap_or(body);
        let body = body.strip_suffix("-->").unwrap_or(body);

        let mut directives = Self::new();
        let mut pending_key: Option<String> = None;

        for token in body.split_whitespace() {
            if let Some(caps) = DIRECTIVE_TOKEN_REGEX.captures(token) {
                let (key, value) = (&caps[1], &caps[2]);
                if let Some(dangling) = pending_key.take() {
                    directives.insert(dangling, DirectiveValue::Text(String::new()));
                }
                if value.is_empty() {
                    pending_key = Some(key.to_string());
                } else {
                    directives.insert(key, parse_value(key, value));
                }
            } else if let Some(key) = pending_key.take() {
                let value = parse_value(&key, token);
                directives.insert(key, value);
            } else {
                tracing::debug!(token, "ignoring bare annotation token");
            }
        }

        if let Some(dangling) = pending_key {
            directives.insert(dangling, DirectiveValue::Text(String::new()));
        }

        directives
    }

    /// The non-empty `extract` value, if any.
    pub fn destination(&self) -> Option<&str> {
        match self.get(EXTRACT_KEY) {
            Some(DirectiveValue::Text(text)) if !text.is_empty() => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&DirectiveValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Plain-text value of `key`, see [`DirectiveValue::as_text`].
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(DirectiveValue::as_text)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Set `key`, replacing an existing value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: DirectiveValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DirectiveValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_value(key: &str, value: &str) -> DirectiveValue {
    // A destination is a path, never a list.
    if key != EXTRACT_KEY && value.contains(LIST_SEPARATOR) {
        DirectiveValue::List(value.split(LIST_SEPARATOR).map(str::to_string).collect())
    } else {
        DirectiveValue::Text(value.to_string())
    }
}

impl Serialize for Directives {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(value: &str) -> DirectiveValue {
        DirectiveValue::Text(value.to_string())
    }

    #[test]
    fn test_parse_destination_and_directives_in_order() {
        let directives =
            Directives::parse("extract:teaser/content-teaser--small.html brand:example name:Teaser");
        let keys: Vec<_> = directives.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["extract", "brand", "name"]);
        assert_eq!(
            directives.destination(),
            Some("teaser/content-teaser--small.html")
        );
        assert_eq!(directives.get("brand"), Some(&text("example")));
    }

    #[test]
    fn test_parse_strips_comment_delimiters() {
        let directives = Directives::parse("<!--extract:card.html-->");
        assert_eq!(directives.destination(), Some("card.html"));
    }

    #[test]
    fn test_whitespace_after_key_takes_next_token() {
        let directives = Directives::parse("<!-- extract: box/card.html name: Card -->");
        assert_eq!(directives.destination(), Some("box/card.html"));
        assert_eq!(directives.get("name"), Some(&text("Card")));
    }

    #[test]
    fn test_colon_value_becomes_list() {
        let directives = Directives::parse("extract:a.html wrap:<div>:</div> tags:a:b:c");
        assert_eq!(
            directives.get("wrap"),
            Some(&DirectiveValue::List(vec!["<div>".into(), "</div>".into()]))
        );
        assert_eq!(directives.text("tags").as_deref(), Some("a:b:c"));
    }

    #[test]
    fn test_extract_value_is_never_split() {
        let directives = Directives::parse("extract:c:/partials/card.html");
        assert_eq!(directives.destination(), Some("c:/partials/card.html"));
    }

    #[test]
    fn test_missing_extract() {
        let directives = Directives::parse("<!-- name:Card -->");
        assert_eq!(directives.destination(), None);
        assert!(directives.contains("name"));
    }

    #[test]
    fn test_empty_extract_is_not_a_destination() {
        let directives = Directives::parse("<!-- extract: name:Card -->");
        assert_eq!(directives.get("extract"), Some(&text("")));
        assert_eq!(directives.destination(), None);
    }

    #[test]
    fn test_unknown_keys_are_preserved() {
        let directives = Directives::parse("extract:a.html data-theme:dark");
        assert_eq!(directives.get("data-theme"), Some(&text("dark")));
    }

    #[test]
    fn test_repeated_key_keeps_position_and_last_value() {
        let directives = Directives::parse("extract:a.html name:First brand:x name:Second");
        let keys: Vec<_> = directives.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["extract", "name", "brand"]);
        assert_eq!(directives.get("name"), Some(&text("Second")));
    }

    #[test]
    fn test_serializes_as_ordered_map() {
        let directives = Directives::parse("extract:a.html wrap:<b>:</b> brand:x");
        let json = serde_json::to_string(&directives).unwrap();
        assert_eq!(
            json,
            r#"{"extract":"a.html","wrap":["<b>","</b>"],"brand":"x"}"#
        );
    }

    #[test]
    fn test_values_serialize_untagged() {
        let values = vec![
            text("a"),
            DirectiveValue::List(vec!["b".into(), "c".into()]),
            DirectiveValue::Wrap(WrapPair::new("<p>", "</p>")),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"["a",["b","c"],{"before":"<p>","after":"</p>"}]"#);
    }
}
