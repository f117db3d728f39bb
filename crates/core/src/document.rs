//! The markup document: an ordered-key JSON tree handed to the renderer.
//!
//! A document is always a JSON object at the top level. Key order is kept
//! exactly as parsed (serde_json's `preserve_order` feature is enabled
//! workspace-wide), so a document written back out reads like its source.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level and nested keys the assembler reads or writes.
///
/// Every other key in a document belongs to the renderer and is passed
/// through untouched.
pub mod keys {
    pub const ROUTING: &str = "routing";
    pub const INITIAL: &str = "initial";
    pub const THEME: &str = "theme";
    pub const CUSTOM_THEMES: &str = "customThemes";
    pub const I18N: &str = "i18n";
    pub const LANG: &str = "lang";
    pub const PLATFORM: &str = "platform";
    pub const ISO3166: &str = "iso3166";
    pub const SCREEN_SET: &str = "screenSet";
}

/// A markup document (or a partial overlay document).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkupDocument(Map<String, Value>);

impl MarkupDocument {
    /// An empty document.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Parse JSON text into a document.
    ///
    /// Any syntactically valid JSON object is accepted. Malformed text, or a
    /// valid JSON value that is not an object, yields a [`ParseError`] and
    /// no partial tree.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let value: Value = serde_json::from_str(text)?;
        Self::try_from(value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Insert a top-level key, returning the previous value.
    ///
    /// Replacing an existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Remove a top-level key without disturbing the order of the others.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// Lay every key of `other` over this document, later keys winning.
    pub fn extend(&mut self, other: MarkupDocument) {
        self.0.extend(other.0);
    }

    /// The `routing.initial` value, if it is a string.
    pub fn initial_route(&self) -> Option<&str> {
        self.0
            .get(keys::ROUTING)?
            .as_object()?
            .get(keys::INITIAL)?
            .as_str()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Pretty-printed JSON text of the document.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_default()
    }
}

impl From<Map<String, Value>> for MarkupDocument {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<MarkupDocument> for Value {
    fn from(doc: MarkupDocument) -> Self {
        doc.into_value()
    }
}

impl TryFrom<Value> for MarkupDocument {
    type Error = ParseError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ParseError::NotAnObject {
                found: value_kind(&other),
            }),
        }
    }
}

/// Short JSON type name for error messages.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
