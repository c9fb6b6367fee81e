//! Variable entry data model.
//!
//! A [`VariableEntry`] is one key/value pair of a variables document together
//! with its editable representation. The value's kind (text, list or map) is
//! decided once from the JSON shape it was built from and cannot change
//! afterwards; kind-specific edits on the wrong kind return
//! [`EditError::KindMismatch`].

use super::error::EditError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use url::Url;
use uuid::Uuid;

/// Stable identity of an entry within a [`VariableSet`](super::set::VariableSet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

/// Stable identity of one slot of a list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(Uuid);

/// Stable identity of one pair of a map entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairId(Uuid);

impl EntryId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl SlotId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl PairId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shape category of an entry's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A single scalar: a string, number, boolean or null.
    Text,
    /// An ordered sequence of values.
    List,
    /// An ordered sequence of (subkey, subvalue) pairs.
    Map,
}

impl EntryKind {
    /// All kinds, in the order a kind selector offers them.
    pub const ALL: [EntryKind; 3] = [EntryKind::Text, EntryKind::List, EntryKind::Map];

    /// Returns the selector string for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Text => "text",
            EntryKind::List => "list",
            EntryKind::Map => "map",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = EditError;

    /// Parses a kind selector value (`"text"`, `"list"` or `"map"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(EntryKind::Text),
            "list" => Ok(EntryKind::List),
            "map" => Ok(EntryKind::Map),
            other => Err(EditError::UnknownKind(other.to_string())),
        }
    }
}

/// Provenance of an entry inherited from an upstream source.
///
/// Inherited entries are shown to the user but never re-submitted on save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    /// Name of the source the entry was inherited from.
    pub tag: String,

    /// Link to the source, usually relative to the document URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl Origin {
    /// Builds an origin from the optional `tag`/`href` fields of a source
    /// element. Returns `None` unless `tag` is present and non-empty.
    pub fn from_tagged(tag: Option<&str>, href: Option<&str>) -> Option<Self> {
        match tag {
            Some(tag) if !tag.is_empty() => Some(Self {
                tag: tag.to_string(),
                href: href.map(str::to_string),
            }),
            _ => None,
        }
    }

    /// Resolves `href` against the URI of the document it came from.
    ///
    /// Returns `None` when there is no `href` or it cannot be joined.
    pub fn resolve_href(&self, base: &Url) -> Option<Url> {
        let href = self.href.as_deref()?;
        base.join(href).ok()
    }
}

/// One editable slot of a list entry.
///
/// The loaded element is kept as is; setting the slot from the editor
/// replaces it with a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSlot {
    pub id: SlotId,
    pub value: Value,
}

impl ListSlot {
    fn new(value: Value) -> Self {
        Self {
            id: SlotId::new(),
            value,
        }
    }
}

/// One editable (subkey, subvalue) pair of a map entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapPair {
    pub id: PairId,
    pub key: String,
    pub value: Value,
}

impl MapPair {
    fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            id: PairId::new(),
            key: key.into(),
            value,
        }
    }
}

/// Editable value of an entry, one variant per [`EntryKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum EntryValue {
    Text(Value),
    List(Vec<ListSlot>),
    Map(Vec<MapPair>),
}

impl EntryValue {
    /// Classifies a JSON value by its shape.
    ///
    /// Arrays become lists, objects become maps and every scalar (string,
    /// number, boolean or null) becomes text. Elements, subvalues and
    /// scalars keep their JSON type until they are edited.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Array(items) => {
                EntryValue::List(items.iter().cloned().map(ListSlot::new).collect())
            }
            Value::Object(fields) => EntryValue::Map(
                fields
                    .iter()
                    .map(|(k, v)| MapPair::new(k.as_str(), v.clone()))
                    .collect(),
            ),
            scalar => EntryValue::Text(scalar.clone()),
        }
    }

    /// Default value for a newly added entry of the given kind.
    ///
    /// Lists start with one empty slot and maps with one empty pair so the
    /// user has a row to type into.
    pub fn empty(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Text => EntryValue::Text(blank()),
            EntryKind::List => EntryValue::List(vec![ListSlot::new(blank())]),
            EntryKind::Map => EntryValue::Map(vec![MapPair::new("", blank())]),
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            EntryValue::Text(_) => EntryKind::Text,
            EntryValue::List(_) => EntryKind::List,
            EntryValue::Map(_) => EntryKind::Map,
        }
    }

    /// Whether the value counts as empty for saving: an empty string or
    /// null, a list without slots, or a map without pairs.
    ///
    /// `0` and `false` are values, not empty text.
    pub fn is_empty(&self) -> bool {
        match self {
            EntryValue::Text(text) => matches!(text, Value::Null) || text.as_str() == Some(""),
            EntryValue::List(slots) => slots.is_empty(),
            EntryValue::Map(pairs) => pairs.is_empty(),
        }
    }

    /// Converts the value to its saved JSON form.
    ///
    /// Map pairs are assigned in order, so a later pair with a duplicate
    /// subkey overwrites an earlier one.
    pub fn to_json(&self) -> Value {
        match self {
            EntryValue::Text(text) => text.clone(),
            EntryValue::List(slots) => {
                Value::Array(slots.iter().map(|slot| slot.value.clone()).collect())
            }
            EntryValue::Map(pairs) => {
                let mut object = Map::new();
                for pair in pairs {
                    object.insert(pair.key.clone(), pair.value.clone());
                }
                Value::Object(object)
            }
        }
    }
}

fn blank() -> Value {
    Value::String(String::new())
}

/// Text to show in an input field for a stored value.
///
/// Strings are shown verbatim, null as an empty field and anything else as
/// its compact JSON text.
pub fn display_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Null => Cow::Borrowed(""),
        other => Cow::Owned(other.to_string()),
    }
}

/// One key/value pair of a variables document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableEntry {
    id: EntryId,
    key: String,
    value: EntryValue,
    origin: Option<Origin>,
}

impl VariableEntry {
    /// Creates an entry from a key and a JSON value, classifying the value
    /// by its shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use vars_editor::models::{EntryKind, VariableEntry};
    /// use serde_json::json;
    ///
    /// let entry = VariableEntry::new("ports", &json!(["80", "443"]), None);
    /// assert_eq!(entry.kind(), EntryKind::List);
    /// ```
    pub fn new(key: impl Into<String>, value: &Value, origin: Option<Origin>) -> Self {
        Self {
            id: EntryId::new(),
            key: key.into(),
            value: EntryValue::from_json(value),
            origin,
        }
    }

    /// Creates an entry with an empty key and the default value for `kind`.
    pub fn empty(kind: EntryKind) -> Self {
        Self {
            id: EntryId::new(),
            key: String::new(),
            value: EntryValue::empty(kind),
            origin: None,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> EntryKind {
        self.value.kind()
    }

    pub fn value(&self) -> &EntryValue {
        &self.value
    }

    pub fn origin(&self) -> Option<&Origin> {
        self.origin.as_ref()
    }

    /// Whether the entry was inherited from an upstream source.
    pub fn is_inherited(&self) -> bool {
        self.origin.is_some()
    }

    pub fn text(&self) -> Option<&Value> {
        match &self.value {
            EntryValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn list_values(&self) -> Option<&[ListSlot]> {
        match &self.value {
            EntryValue::List(slots) => Some(slots),
            _ => None,
        }
    }

    pub fn map_pairs(&self) -> Option<&[MapPair]> {
        match &self.value {
            EntryValue::Map(pairs) => Some(pairs),
            _ => None,
        }
    }

    pub fn set_key(&mut self, key: impl Into<String>) {
        self.key = key.into();
    }

    /// Replaces the value of a text entry.
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<(), EditError> {
        match &mut self.value {
            EntryValue::Text(current) => {
                *current = Value::String(text.into());
                Ok(())
            }
            other => Err(EditError::KindMismatch {
                expected: EntryKind::Text,
                actual: other.kind(),
            }),
        }
    }

    /// Appends an empty slot to a list entry.
    pub fn add_list_value(&mut self) -> Result<SlotId, EditError> {
        let slot = ListSlot::new(blank());
        let id = slot.id;
        self.slots_mut()?.push(slot);
        Ok(id)
    }

    /// Removes a slot from a list entry. Returns `Ok(false)` if the slot is
    /// not part of this entry.
    pub fn remove_list_value(&mut self, slot: SlotId) -> Result<bool, EditError> {
        let slots = self.slots_mut()?;
        let before = slots.len();
        slots.retain(|s| s.id != slot);
        Ok(slots.len() != before)
    }

    /// Replaces the text of one slot of a list entry.
    pub fn set_list_value(
        &mut self,
        slot: SlotId,
        value: impl Into<String>,
    ) -> Result<bool, EditError> {
        match self.slots_mut()?.iter_mut().find(|s| s.id == slot) {
            Some(s) => {
                s.value = Value::String(value.into());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Appends an empty `("", "")` pair to a map entry.
    pub fn add_map_value(&mut self) -> Result<PairId, EditError> {
        let pair = MapPair::new("", blank());
        let id = pair.id;
        self.pairs_mut()?.push(pair);
        Ok(id)
    }

    /// Removes a pair from a map entry. Returns `Ok(false)` if the pair is
    /// not part of this entry.
    pub fn remove_map_value(&mut self, pair: PairId) -> Result<bool, EditError> {
        let pairs = self.pairs_mut()?;
        let before = pairs.len();
        pairs.retain(|p| p.id != pair);
        Ok(pairs.len() != before)
    }

    pub fn set_map_key(&mut self, pair: PairId, key: impl Into<String>) -> Result<bool, EditError> {
        match self.pairs_mut()?.iter_mut().find(|p| p.id == pair) {
            Some(p) => {
                p.key = key.into();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn set_map_value(
        &mut self,
        pair: PairId,
        value: impl Into<String>,
    ) -> Result<bool, EditError> {
        match self.pairs_mut()?.iter_mut().find(|p| p.id == pair) {
            Some(p) => {
                p.value = Value::String(value.into());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Returns the value this entry contributes to a save, or `None` when
    /// the entry is inherited, has an empty key, or has an empty value.
    pub fn saved_value(&self) -> Option<Value> {
        if self.is_inherited() || self.key.is_empty() || self.value.is_empty() {
            return None;
        }
        Some(self.value.to_json())
    }

    /// Plain copy of the entry, detached from the editing model.
    pub fn snapshot(&self) -> EntrySnapshot {
        EntrySnapshot {
            id: self.id,
            key: self.key.clone(),
            value: self.value.clone(),
            origin: self.origin.clone(),
        }
    }

    fn slots_mut(&mut self) -> Result<&mut Vec<ListSlot>, EditError> {
        match &mut self.value {
            EntryValue::List(slots) => Ok(slots),
            other => Err(EditError::KindMismatch {
                expected: EntryKind::List,
                actual: other.kind(),
            }),
        }
    }

    fn pairs_mut(&mut self) -> Result<&mut Vec<MapPair>, EditError> {
        match &mut self.value {
            EntryValue::Map(pairs) => Ok(pairs),
            other => Err(EditError::KindMismatch {
                expected: EntryKind::Map,
                actual: other.kind(),
            }),
        }
    }
}

/// Serializable, read-only copy of a [`VariableEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrySnapshot {
    pub id: EntryId,
    pub key: String,
    #[serde(flatten)]
    pub value: EntryValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
}
