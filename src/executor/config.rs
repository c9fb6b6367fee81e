//! HTTP execution configuration.
//!
//! This module defines the options the document client is built with.

use crate::auth::Credentials;
use crate::config::{get_config, EditorConfig};
use std::collections::HashMap;

/// Configuration for the document client.
#[derive(Debug, Clone)]
pub struct ExecutionConfig {
    /// Request timeout in seconds.
    ///
    /// Maximum time to wait for a complete response (including connection,
    /// headers, and body download).
    pub timeout_secs: u64,

    /// Whether to validate TLS certificates.
    pub validate_ssl: bool,

    /// Headers sent with every request.
    pub default_headers: HashMap<String, String>,

    /// Basic authentication credentials, if any.
    pub credentials: Option<Credentials>,
}

impl ExecutionConfig {
    /// Creates a new ExecutionConfig with the given timeout and no extra
    /// headers or credentials.
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            timeout_secs,
            validate_ssl: true,
            default_headers: HashMap::new(),
            credentials: None,
        }
    }

    /// Creates an ExecutionConfig from an editor configuration.
    pub fn from_editor_config(config: &EditorConfig) -> Self {
        Self {
            timeout_secs: config.timeout_secs(),
            validate_ssl: config.validate_ssl,
            default_headers: config.default_headers.clone(),
            credentials: config.credentials(),
        }
    }

    /// Creates an ExecutionConfig from the global configuration.
    pub fn from_global_config() -> Self {
        Self::from_editor_config(&get_config())
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    /// Returns the timeout as a `std::time::Duration`.
    pub fn timeout_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ExecutionConfig {
    /// Reads settings from the global configuration.
    fn default() -> Self {
        Self::from_global_config()
    }
}
