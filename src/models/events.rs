//! Change notifications for the editing model.
//!
//! Hosts that render a [`VariableSet`](super::set::VariableSet) subscribe to
//! these events instead of binding to the model's fields directly.

use super::entry::EntryId;

/// A change to the entries of a variable set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    /// An entry was appended (or replaced one that was removed).
    EntryAdded(EntryId),
    /// An entry was removed.
    EntryRemoved(EntryId),
    /// An existing entry was edited in place.
    EntryChanged(EntryId),
}

impl ChangeEvent {
    /// The entry the event refers to.
    pub fn entry_id(&self) -> EntryId {
        match self {
            ChangeEvent::EntryAdded(id)
            | ChangeEvent::EntryRemoved(id)
            | ChangeEvent::EntryChanged(id) => *id,
        }
    }
}

/// Handle returned by `subscribe`, used to unsubscribe again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

/// Callback invoked for every change event.
pub type ChangeListener = Box<dyn FnMut(&ChangeEvent) + Send>;
