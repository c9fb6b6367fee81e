//! Variables editor
//!
//! Editing model and REST round trip for key/value "variables" documents.
//! A document is fetched from a single resource URI, its `vars` field is
//! turned into an ordered set of editable entries, and the edited set is
//! written back with a `PUT` of the whole document.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - **models**: The document, the editable entries (text, list or map) and
//!   the ordered [`VariableSet`](models::VariableSet) with change events
//! - **executor**: Loads and saves documents using reqwest
//! - **session**: Entry points that tie loading, editing and saving together
//! - **config**: Global configuration (timeout, TLS, headers, credentials)
//! - **auth**: HTTP Basic authentication
//!
//! # Saving
//!
//! Saving turns the entries back into a plain JSON object:
//! 1. Inherited entries (those that arrived with a `tag`) are skipped
//! 2. Entries with an empty key or an empty value are dropped
//! 3. Text entries become their scalar, lists become arrays, maps become
//!    objects; values nobody edited keep their loaded JSON type
//! 4. When keys collide, the later entry wins
//!
//! The object replaces the document's `vars` field; all other fields are sent
//! back unchanged.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use vars_editor::executor::ExecutionConfig;
//! use vars_editor::models::EntryKind;
//! use vars_editor::session::{open_editor, LogNotifier};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = open_editor(
//!     "http://localhost:5000/api/item/fireflash/",
//!     &ExecutionConfig::from_global_config(),
//!     Arc::new(LogNotifier),
//! )
//! .await?;
//!
//! let set = session.variables_mut();
//! set.subscribe(|event| println!("changed: {:?}", event));
//! let id = set.add_entry(EntryKind::Text);
//! set.edit(id, |entry| {
//!     entry.set_key("hello");
//!     entry.set_text("world")
//! });
//!
//! session.save().await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod executor;
pub mod models;
pub mod session;

pub use models::{Document, EntryKind, VariableEntry, VariableSet};
pub use session::{load_editor, open_editor, EditorError, EditorSession, LogNotifier, Notifier};
