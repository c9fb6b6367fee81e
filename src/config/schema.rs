//! Configuration schema for the variables editor.
//!
//! This module defines the configuration structure and validation logic for
//! all user-configurable settings.

use crate::auth::Credentials;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Main configuration structure for the variables editor.
///
/// All settings live under the "vars-editor" key of a settings object.
/// Missing settings fall back to defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Request timeout in milliseconds, for both loading and saving.
    ///
    /// Must be greater than 0. Defaults to 30000ms.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Whether to validate SSL/TLS certificates of the document server.
    ///
    /// **Warning:** Disabling SSL validation can expose you to security risks.
    #[serde(default = "default_validate_ssl")]
    pub validate_ssl: bool,

    /// Headers sent with every request. Defaults to a User-Agent header.
    #[serde(default = "default_headers")]
    pub default_headers: HashMap<String, String>,

    /// Username for HTTP Basic authentication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Password for HTTP Basic authentication. Requires `username`.
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            validate_ssl: default_validate_ssl(),
            default_headers: default_headers(),
            username: None,
            password: None,
        }
    }
}

impl EditorConfig {
    /// Validates the configuration.
    ///
    /// # Returns
    ///
    /// `Ok(())` if all settings are valid, or `Err` with a descriptive error message.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout == 0 {
            return Err("timeout must be greater than 0".to_string());
        }

        if self.password.is_some() && self.username.is_none() {
            return Err("password requires a username".to_string());
        }

        for name in self.default_headers.keys() {
            if reqwest::header::HeaderName::from_bytes(name.as_bytes()).is_err() {
                return Err(format!("invalid header name in defaultHeaders: '{}'", name));
            }
        }

        Ok(())
    }

    /// Returns the timeout as a `std::time::Duration`.
    pub fn timeout_duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout)
    }

    /// Returns the timeout in whole seconds, rounded up.
    pub fn timeout_secs(&self) -> u64 {
        (self.timeout + 999) / 1000
    }

    /// Basic authentication credentials, if a username is configured.
    pub fn credentials(&self) -> Option<Credentials> {
        let username = self.username.as_ref()?;
        Some(Credentials::new(
            username.clone(),
            self.password.clone().unwrap_or_default(),
        ))
    }

    /// Merges user settings on top of this configuration.
    ///
    /// Scalar settings are taken from `other`. Headers from `other` are added
    /// to (and override) this configuration's headers, and credentials from
    /// `other` replace these only when `other` has a username.
    pub fn merge(&self, other: &EditorConfig) -> Self {
        let mut default_headers = self.default_headers.clone();
        default_headers.extend(other.default_headers.clone());

        let (username, password) = if other.username.is_some() {
            (other.username.clone(), other.password.clone())
        } else {
            (self.username.clone(), self.password.clone())
        };

        Self {
            timeout: other.timeout,
            validate_ssl: other.validate_ssl,
            default_headers,
            username,
            password,
        }
    }
}

// Default value functions for serde

fn default_timeout() -> u64 {
    30000 // 30 seconds in milliseconds
}

fn default_validate_ssl() -> bool {
    true
}

fn default_headers() -> HashMap<String, String> {
    let mut headers = HashMap::new();
    headers.insert(
        "User-Agent".to_string(),
        format!("vars-editor/{}", env!("CARGO_PKG_VERSION")),
    );
    headers
}
