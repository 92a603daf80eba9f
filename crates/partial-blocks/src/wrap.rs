//! Wrap formalization
//!
//! A wrap can be written several ways: inline in an annotation
//! (`wrap:<section>` or `wrap:<section>:</section>`) or in the run
//! configuration as a string, number, list or `{before, after}` table. All of
//! them collapse into one [`WrapPair`].

use crate::directive::DirectiveValue;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Literal text placed before and after a block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WrapPair {
    pub before: String,
    pub after: String,
}

impl WrapPair {
    pub fn new(before: impl Into<String>, after: impl Into<String>) -> Self {
        Self {
            before: before.into(),
            after: after.into(),
        }
    }

    /// Both sides empty.
    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }
}

/// Explicit `{before, after}` table; any other key is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WrapFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

/// Any accepted wrap shape, before formalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WrapSpec {
    Text(String),
    Number(serde_json::Number),
    Sequence(Vec<String>),
    Fields(WrapFields),
}

impl Default for WrapSpec {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl WrapSpec {
    /// Collapse this shape into a `{before, after}` pair.
    ///
    /// - a scalar is used for both sides
    /// - a one-element sequence is used for both sides, two elements map to
    ///   `before` and `after`, an empty sequence means no wrap
    /// - a table missing `after` reuses `before` (and vice versa)
    ///
    /// # Errors
    ///
    /// Sequences longer than two elements are ambiguous and rejected.
    pub fn formalize(&self) -> Result<WrapPair> {
        match self {
            Self::Text(text) => Ok(WrapPair::new(text.clone(), text.clone())),
            Self::Number(number) => {
                let text = number.to_string();
                Ok(WrapPair::new(text.clone(), text))
            }
            Self::Sequence(items) => match items.as_slice() {
                [] => Ok(WrapPair::default()),
                [both] => Ok(WrapPair::new(both.clone(), both.clone())),
                [before, after] => Ok(WrapPair::new(before.clone(), after.clone())),
                _ => Err(Error::InvalidWrap {
                    message: format!("expected at most two parts, found {}", items.len()),
                }),
            },
            Self::Fields(fields) => {
                let before = fields
                    .before
                    .clone()
                    .or_else(|| fields.after.clone())
                    .unwrap_or_default();
                let after = fields.after.clone().unwrap_or_else(|| before.clone());
                Ok(WrapPair::new(before, after))
            }
        }
    }
}

impl From<&DirectiveValue> for WrapSpec {
    fn from(value: &DirectiveValue) -> Self {
        match value {
            DirectiveValue::Text(text) => Self::Text(text.clone()),
            DirectiveValue::List(items) => Self::Sequence(items.clone()),
            DirectiveValue::Wrap(pair) => Self::Fields(WrapFields {
                before: Some(pair.before.clone()),
                after: Some(pair.after.clone()),
            }),
        }
    }
}
