//! Ordered collection of variable entries for one document.
//!
//! [`VariableSet`] owns every entry, mediates all edits so that subscribers
//! are notified, and turns the edited entries back into the plain mapping
//! that is saved.

use super::document::{Document, Vars};
use super::entry::{EntryId, EntryKind, EntrySnapshot, Origin, VariableEntry};
use super::error::EditError;
use super::events::{ChangeEvent, ChangeListener, SubscriptionId};
use serde_json::{Map, Value};
use std::fmt;

/// The editable variables of one document.
#[derive(Default)]
pub struct VariableSet {
    entries: Vec<VariableEntry>,
    listeners: Vec<(SubscriptionId, ChangeListener)>,
    next_subscription: u64,
}

impl fmt::Debug for VariableSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableSet")
            .field("entries", &self.entries)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl VariableSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the set for a `vars` field.
    ///
    /// Map-shaped vars produce one entry per key in ascending key order.
    /// List-shaped vars keep their element order, and elements with a
    /// non-empty `tag` become inherited entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use vars_editor::models::{Vars, VariableSet};
    /// use serde_json::json;
    ///
    /// let vars: Vars = serde_json::from_value(json!({"b": "y", "a": "x"})).unwrap();
    /// let set = VariableSet::from_vars(&vars);
    /// let keys: Vec<&str> = set.iter().map(|e| e.key()).collect();
    /// assert_eq!(keys, vec!["a", "b"]);
    /// ```
    pub fn from_vars(vars: &Vars) -> Self {
        let entries = match vars {
            Vars::List(list) => list
                .iter()
                .map(|var| {
                    let origin = Origin::from_tagged(var.tag.as_deref(), var.href.as_deref());
                    VariableEntry::new(var.key.as_str(), &var.value, origin)
                })
                .collect(),
            Vars::Map(map) => {
                let mut keys: Vec<&String> = map.keys().collect();
                keys.sort();
                keys.into_iter()
                    .map(|key| VariableEntry::new(key.as_str(), &map[key.as_str()], None))
                    .collect()
            }
        };

        Self {
            entries,
            ..Self::default()
        }
    }

    pub fn from_document(document: &Document) -> Self {
        Self::from_vars(&document.vars)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[VariableEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &VariableEntry> {
        self.entries.iter()
    }

    pub fn get(&self, id: EntryId) -> Option<&VariableEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    /// Appends a new entry with an empty key and the default value for
    /// `kind`.
    pub fn add_entry(&mut self, kind: EntryKind) -> EntryId {
        let entry = VariableEntry::empty(kind);
        let id = entry.id();
        self.entries.push(entry);
        self.emit(ChangeEvent::EntryAdded(id));
        id
    }

    /// Appends a new entry whose kind comes from a kind selector value
    /// (`"text"`, `"list"` or `"map"`).
    pub fn add_entry_from_selection(&mut self, selection: &str) -> Result<EntryId, EditError> {
        let kind = selection.parse::<EntryKind>()?;
        Ok(self.add_entry(kind))
    }

    /// Removes an entry. Returns `false` if it is not part of the set.
    pub fn remove_entry(&mut self, id: EntryId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id() != id);
        let removed = self.entries.len() != before;
        if removed {
            self.emit(ChangeEvent::EntryRemoved(id));
        }
        removed
    }

    /// Edits one entry in place and notifies subscribers.
    ///
    /// Returns `None` if the entry is not part of the set; otherwise the
    /// closure's result.
    ///
    /// # Examples
    ///
    /// ```
    /// use vars_editor::models::{EntryKind, VariableSet};
    ///
    /// let mut set = VariableSet::new();
    /// let id = set.add_entry(EntryKind::List);
    /// let slot = set.edit(id, |entry| entry.add_list_value()).unwrap().unwrap();
    /// set.edit(id, |entry| entry.set_list_value(slot, "z")).unwrap().unwrap();
    /// ```
    pub fn edit<R, F>(&mut self, id: EntryId, f: F) -> Option<R>
    where
        F: FnOnce(&mut VariableEntry) -> R,
    {
        let entry = self.entries.iter_mut().find(|e| e.id() == id)?;
        let result = f(entry);
        self.emit(ChangeEvent::EntryChanged(id));
        Some(result)
    }

    /// Sets an own variable from a JSON value.
    ///
    /// The first non-inherited entry with the same key is replaced by a
    /// freshly classified entry at the same position; otherwise a new entry
    /// is appended. Inherited entries are never touched.
    pub fn set_variable(&mut self, key: &str, value: &Value) -> EntryId {
        let entry = VariableEntry::new(key, value, None);
        let id = entry.id();

        match self
            .entries
            .iter()
            .position(|e| !e.is_inherited() && e.key() == key)
        {
            Some(index) => {
                let old = std::mem::replace(&mut self.entries[index], entry);
                self.emit(ChangeEvent::EntryRemoved(old.id()));
            }
            None => self.entries.push(entry),
        }
        self.emit(ChangeEvent::EntryAdded(id));
        id
    }

    /// Removes every non-inherited entry with the given key and returns how
    /// many were removed.
    pub fn remove_variable(&mut self, key: &str) -> usize {
        let removed: Vec<EntryId> = self
            .entries
            .iter()
            .filter(|e| !e.is_inherited() && e.key() == key)
            .map(|e| e.id())
            .collect();
        self.entries.retain(|e| e.is_inherited() || e.key() != key);
        for id in &removed {
            self.emit(ChangeEvent::EntryRemoved(*id));
        }
        removed.len()
    }

    /// Plain copies of all entries, in order.
    pub fn snapshot(&self) -> Vec<EntrySnapshot> {
        self.entries.iter().map(VariableEntry::snapshot).collect()
    }

    /// Builds the object-shaped mapping a save submits.
    ///
    /// Inherited entries and entries with an empty key or an empty value are
    /// left out. When two entries share a key the later one wins.
    pub fn to_vars(&self) -> Map<String, Value> {
        let mut vars = Map::new();
        for item in self.snapshot() {
            if item.origin.is_some() || item.key.is_empty() || item.value.is_empty() {
                continue;
            }
            vars.insert(item.key, item.value.to_json());
        }
        vars
    }

    /// Serializes the current entries and hands the result to `submit`,
    /// which is invoked exactly once.
    pub fn save<R, F>(&self, submit: F) -> R
    where
        F: FnOnce(Map<String, Value>) -> R,
    {
        submit(self.to_vars())
    }

    /// Registers a listener for change events.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&ChangeEvent) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn emit(&mut self, event: ChangeEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}
