//! Model configuration
//!
//! A configuration is a flat mapping of keys to values read from a text file at
//! initialisation time. The file format is selected from the extension:
//! `.toml` files are parsed as TOML, everything else as JSON.

use crate::errors::{BmiError, BmiResult};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Key/value configuration of a model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config(Map<String, Value>);

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from a JSON document
    pub fn from_json_str(contents: &str) -> Result<Self, String> {
        serde_json::from_str(contents).map_err(|e| e.to_string())
    }

    /// Parse a configuration from a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| e.to_string())
    }

    /// Builder-style insertion of a single value
    pub fn with_value(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get a required numeric value
    ///
    /// Integers are accepted and widened to floats.
    pub fn get_float(&self, key: &str) -> BmiResult<f64> {
        let value = self
            .get(key)
            .ok_or_else(|| BmiError::MissingConfigKey(key.to_string()))?;

        value.as_f64().ok_or_else(|| BmiError::InvalidValue {
            name: key.to_string(),
            reason: format!("expected a number, got {}", value),
        })
    }
}

impl From<Map<String, Value>> for Config {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

/// Read a configuration file
///
/// Fails if the file cannot be read or does not contain a key/value mapping.
pub fn read_config(path: impl AsRef<Path>) -> BmiResult<Config> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| BmiError::ConfigIo {
        path: path.to_path_buf(),
        source,
    })?;

    let is_toml = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);
    let config = if is_toml {
        Config::from_toml_str(&contents)
    } else {
        Config::from_json_str(&contents)
    }
    .map_err(|message| BmiError::ConfigParse {
        path: path.to_path_buf(),
        message,
    })?;

    debug!("Read {} configuration keys from {}", config.len(), path.display());
    Ok(config)
}
