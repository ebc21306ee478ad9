use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::error::ConfigError;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "toml",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                #[cfg(feature = "yaml-config")]
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                #[cfg(feature = "toml-config")]
                "toml" => Some(ConfigFormat::Toml),
                _ => None,
            })
    }
}

/// Nested configuration mapping handed through the validation pipeline.
///
/// Values are addressed by dotted property paths; intermediate objects are
/// created on `set`. The whole tree is passed by reference through the
/// pipeline, so later validators observe earlier validators' normalized
/// output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigTree {
    /// Raw configuration values
    #[serde(flatten)]
    values: Map<String, Value>,
}

impl ConfigTree {
    /// Create a new empty configuration tree
    pub fn new() -> Self {
        Self { values: Map::new() }
    }

    /// Create a tree from a map of top-level values
    pub fn from_map(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// Create a tree from a JSON value; the root must be an object.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        match value {
            Value::Object(values) => Ok(Self { values }),
            _ => Err(ConfigError::NotAnObject),
        }
    }

    /// Get the value at a dotted property path
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.values.get(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    /// Set the value at a dotted property path, creating (or replacing
    /// non-object values with) intermediate objects as needed
    pub fn set(&mut self, path: &str, value: Value) {
        set_nested(&mut self.values, path, value);
    }

    /// Remove the value at a dotted property path
    pub fn remove(&mut self, path: &str) -> Option<Value> {
        remove_nested(&mut self.values, path)
    }

    /// Check if a dotted property path exists
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Top-level keys
    pub fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    /// Borrow the top-level map
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Merge with another tree, overriding existing top-level values
    pub fn merge(&mut self, other: &ConfigTree) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Serialize to string based on format
    pub fn serialize(&self, format: ConfigFormat) -> Result<String, ConfigError> {
        match format {
            ConfigFormat::Json => {
                serde_json::to_string_pretty(&self).map_err(|e| ConfigError::Serialize {
                    format: "JSON".to_string(),
                    reason: e.to_string(),
                })
            }
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => {
                serde_yaml::to_string(&self).map_err(|e| ConfigError::Serialize {
                    format: "YAML".to_string(),
                    reason: e.to_string(),
                })
            }
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => {
                toml::to_string_pretty(&self).map_err(|e| ConfigError::Serialize {
                    format: "TOML".to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Deserialize from string based on format
    pub fn deserialize(data: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        match format {
            ConfigFormat::Json => {
                serde_json::from_str(data).map_err(|e| ConfigError::Deserialize {
                    format: "JSON".to_string(),
                    reason: e.to_string(),
                })
            }
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => {
                serde_yaml::from_str(data).map_err(|e| ConfigError::Deserialize {
                    format: "YAML".to_string(),
                    reason: e.to_string(),
                })
            }
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::from_str(data).map_err(|e| ConfigError::Deserialize {
                format: "TOML".to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Load a tree from a file, inferring the format from the extension.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
        let data = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ConfigError::Read {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        Self::deserialize(&data, format)
    }
}

fn set_nested(map: &mut Map<String, Value>, path: &str, value: Value) {
    match path.split_once('.') {
        None => {
            map.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let entry = map
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            if let Some(nested) = entry.as_object_mut() {
                set_nested(nested, rest, value);
            }
        }
    }
}

fn remove_nested(map: &mut Map<String, Value>, path: &str) -> Option<Value> {
    match path.split_once('.') {
        None => map.remove(path),
        Some((head, rest)) => remove_nested(map.get_mut(head)?.as_object_mut()?, rest),
    }
}
