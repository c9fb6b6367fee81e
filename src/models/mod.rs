//! Data models for variables documents and their editing model.
//!
//! This module contains the document as fetched from the server, the
//! editable entries built from its `vars` field, and the change events the
//! editing model emits.

pub mod document;
pub mod entry;
pub mod error;
pub mod events;
pub mod set;

pub use document::{Document, TaggedVariable, Vars};
pub use entry::{
    display_text, EntryId, EntryKind, EntrySnapshot, EntryValue, ListSlot, MapPair, Origin,
    PairId, SlotId, VariableEntry,
};
pub use error::EditError;
pub use events::{ChangeEvent, ChangeListener, SubscriptionId};
pub use set::VariableSet;
