//! Editing error types.
//!
//! Edits that do not fit an entry's kind are rejected instead of silently
//! coercing the value into another shape.

use super::entry::EntryKind;
use std::fmt;

/// Errors that can occur while editing variable entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// A kind-specific operation was applied to an entry of another kind.
    ///
    /// For example, calling `add_list_value` on a text entry.
    KindMismatch {
        expected: EntryKind,
        actual: EntryKind,
    },

    /// A kind selector string was not one of `text`, `list` or `map`.
    UnknownKind(String),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::KindMismatch { expected, actual } => write!(
                f,
                "Operation requires a {} entry, but the entry is {}",
                expected, actual
            ),
            EditError::UnknownKind(kind) => write!(
                f,
                "Unknown variable type '{}' (expected text, list or map)",
                kind
            ),
        }
    }
}

impl std::error::Error for EditError {}
