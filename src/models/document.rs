//! Variables document model.
//!
//! The document is the full JSON resource fetched from and saved to the
//! configured URI. Only its `vars` field is edited; every other field is kept
//! in insertion order and written back unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One element of a list-shaped `vars` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedVariable {
    pub key: String,

    #[serde(default)]
    pub value: Value,

    /// Name of the upstream source the variable was inherited from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Link to the upstream source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl TaggedVariable {
    /// Whether the variable carries a non-empty `tag`.
    pub fn is_inherited(&self) -> bool {
        self.tag.as_deref().is_some_and(|tag| !tag.is_empty())
    }
}

/// The `vars` field of a document, in either of its persisted shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Vars {
    /// `{"key": value, ...}`, the shape that is always written back.
    Map(Map<String, Value>),
    /// `[{"key": ..., "value": ..., "tag": ..., "href": ...}, ...]`
    List(Vec<TaggedVariable>),
}

impl Default for Vars {
    fn default() -> Self {
        Vars::Map(Map::new())
    }
}

impl Vars {
    pub fn len(&self) -> usize {
        match self {
            Vars::Map(map) => map.len(),
            Vars::List(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A variables document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub vars: Vars,

    /// Every other field of the resource, round-tripped untouched.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Document {
    /// Parses a document from its JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Serializes the whole document, as sent in a save request.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Replaces `vars` with an object-shaped mapping.
    pub fn replace_vars(&mut self, vars: Map<String, Value>) {
        self.vars = Vars::Map(vars);
    }

    /// The document's `name` field, if it has a string one.
    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    /// Variables inherited from upstream sources (list shape only).
    pub fn inherited(&self) -> Vec<&TaggedVariable> {
        match &self.vars {
            Vars::List(list) => list.iter().filter(|v| v.is_inherited()).collect(),
            Vars::Map(_) => Vec::new(),
        }
    }
}
