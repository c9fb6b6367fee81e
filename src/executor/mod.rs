//! HTTP transport for variables documents.
//!
//! This module loads a document with `GET`, saves it with `PUT`, and maps
//! transport and status failures onto [`LoadError`] and [`SaveError`].

pub mod client;
pub mod config;
pub mod error;

pub use client::{is_load_success, DocumentClient, SaveReceipt};
pub use config::ExecutionConfig;
pub use error::{LoadError, RequestError, SaveError};
