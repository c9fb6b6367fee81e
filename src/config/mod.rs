//! Configuration management for the variables editor.
//!
//! This module provides configuration loading, validation, and access through a singleton pattern.
//! Configuration is read from the "vars-editor" key of a settings object and merged with defaults.

pub mod schema;

pub use schema::EditorConfig;

use log::warn;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::RwLock;

/// Key of the editor's section in a settings object.
pub const SETTINGS_KEY: &str = "vars-editor";

/// Global configuration instance.
///
/// This is lazily initialized on first access and can be updated when settings change.
static CONFIG: Lazy<RwLock<EditorConfig>> = Lazy::new(|| RwLock::new(EditorConfig::default()));

/// Errors that can occur while loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The settings file could not be read.
    Io(String),

    /// The settings file is not valid JSON.
    Parse(String),

    /// The merged configuration failed validation.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "Failed to read settings file: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Failed to parse settings file: {}", msg),
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Loads configuration from a settings JSON value.
///
/// Reads the "vars-editor" section, merges it with defaults, validates the
/// result, and updates the global configuration. A section that does not
/// deserialize is logged and ignored.
///
/// # Example
///
/// ```no_run
/// use vars_editor::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({
///     "vars-editor": {
///         "timeout": 60000,
///         "validateSsl": false
///     }
/// });
///
/// let config = load_config(Some(settings)).unwrap();
/// assert_eq!(config.timeout, 60000);
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<EditorConfig, ConfigError> {
    let mut config = EditorConfig::default();

    if let Some(section) = settings_json.as_ref().and_then(|s| s.get(SETTINGS_KEY)) {
        match serde_json::from_value::<EditorConfig>(section.clone()) {
            Ok(user_config) => {
                config = config.merge(&user_config);
            }
            Err(e) => {
                warn!(
                    "Failed to parse {} settings: {}. Using defaults.",
                    SETTINGS_KEY, e
                );
            }
        }
    }

    config.validate().map_err(ConfigError::Invalid)?;

    if let Ok(mut global_config) = CONFIG.write() {
        *global_config = config.clone();
    }

    Ok(config)
}

/// Loads configuration from a JSON settings file.
///
/// The file holds a settings object with a "vars-editor" section, the same
/// shape [`load_config`] accepts.
pub fn load_config_file(path: &Path) -> Result<EditorConfig, ConfigError> {
    let text = fs::read_to_string(path)?;
    let settings: Value = serde_json::from_str(&text)?;
    load_config(Some(settings))
}

/// Gets the current global configuration.
///
/// Returns the default configuration if none has been loaded yet.
pub fn get_config() -> EditorConfig {
    CONFIG
        .read()
        .map(|c| c.clone())
        .unwrap_or_else(|_| EditorConfig::default())
}

/// Updates the global configuration in place.
///
/// If the updated configuration fails validation it is reset to defaults.
///
/// # Example
///
/// ```no_run
/// use vars_editor::config::update_config;
///
/// update_config(|config| {
///     config.timeout = 60000;
/// });
/// ```
pub fn update_config<F>(updater: F)
where
    F: FnOnce(&mut EditorConfig),
{
    if let Ok(mut config) = CONFIG.write() {
        updater(&mut config);

        if let Err(e) = config.validate() {
            warn!("Configuration validation failed after update: {}", e);
            *config = EditorConfig::default();
        }
    }
}

/// Resets the configuration to defaults.
pub fn reset_config() {
    if let Ok(mut config) = CONFIG.write() {
        *config = EditorConfig::default();
    }
}
