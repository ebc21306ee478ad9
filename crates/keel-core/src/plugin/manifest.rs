use std::collections::BTreeMap;

use serde_json::{Map, Value, json};

use crate::config::schema::{FieldSchema, Rule, Schema, ValueType, camel_case};
use crate::container::definition::ComponentDefinition;
use crate::plugin::error::PluginSystemError;

/// Default entry file inside a plugin's directory.
pub const DEFAULT_PLUGIN_FILE: &str = "index";

/// Describes an installable unit contributing components, commands, and
/// configuration to the host application.
#[derive(Debug, Clone)]
pub struct PluginManifest {
    /// Unique identifier for the plugin; must be camel-case
    pub id: String,

    /// Install path; may be alias-prefixed
    pub path: String,

    /// Entry file inside the plugin directory
    pub file: String,

    /// Alias registered for the plugin's resolved path (without marker)
    pub alias: Option<String>,

    /// Whether the plugin is skipped entirely
    pub disabled: bool,

    /// Whether the plugin's commands are loaded
    pub commands: bool,

    /// Free-form plugin configuration
    pub config: Map<String, Value>,

    /// Component definitions merged into the application's registry when
    /// the plugin is enabled
    pub components: BTreeMap<String, ComponentDefinition>,
}

impl PluginManifest {
    /// Create a manifest with the declared defaults.
    pub fn new(id: &str, path: &str) -> Self {
        Self {
            id: id.to_string(),
            path: path.to_string(),
            file: DEFAULT_PLUGIN_FILE.to_string(),
            alias: None,
            disabled: false,
            commands: true,
            config: Map::new(),
            components: BTreeMap::new(),
        }
    }

    /// The declarative schema a plugin entry must satisfy.
    pub fn schema() -> Schema {
        Schema::new("plugin")
            .field(
                "path",
                FieldSchema::new("plugin path")
                    .required()
                    .rule(Rule::of_type(ValueType::String))
                    .rule(Rule::min_length(3))
                    .rule(Rule::max_length(250)),
            )
            .field(
                "file",
                FieldSchema::new("plugin file")
                    .rule(Rule::of_type(ValueType::String))
                    .default_value(json!(DEFAULT_PLUGIN_FILE)),
            )
            .field(
                "alias",
                FieldSchema::new("plugin alias")
                    .rule(Rule::of_type(ValueType::String))
                    .rule(Rule::pattern(camel_case()))
                    .rule(Rule::max_length(50)),
            )
            .field(
                "disabled",
                FieldSchema::new("plugin disabled flag")
                    .rule(Rule::of_type(ValueType::Boolean))
                    .default_value(json!(false)),
            )
            .field(
                "commands",
                FieldSchema::new("plugin commands flag")
                    .rule(Rule::of_type(ValueType::Boolean))
                    .default_value(json!(true)),
            )
            .field(
                "config",
                FieldSchema::new("plugin configuration").rule(Rule::of_type(ValueType::Object)),
            )
            .field(
                "components",
                FieldSchema::new("plugin components")
                    .rule(Rule::of_type(ValueType::Object))
                    .nested(
                        Schema::new("plugin components")
                            .key_pattern(camel_case())
                            .entries(FieldSchema::new("component definition").rule(
                                Rule::any_of_types(vec![ValueType::String, ValueType::Object]),
                            )),
                    ),
            )
            // Additional plain settings are tolerated when camel-cased
            .key_pattern(camel_case())
    }

    /// Build a manifest from a validated configuration entry.
    pub fn from_value(id: &str, value: &Value) -> Result<Self, PluginSystemError> {
        let map = value
            .as_object()
            .ok_or_else(|| PluginSystemError::InvalidManifest {
                id: id.to_string(),
                reason: "plugin entry must be an object".to_string(),
            })?;

        let path =
            map.get("path")
                .and_then(Value::as_str)
                .ok_or_else(|| PluginSystemError::InvalidManifest {
                    id: id.to_string(),
                    reason: "missing required string member 'path'".to_string(),
                })?;

        let mut manifest = Self::new(id, path);
        if let Some(file) = map.get("file").and_then(Value::as_str) {
            manifest.file = file.to_string();
        }
        manifest.alias = map
            .get("alias")
            .and_then(Value::as_str)
            .map(str::to_string);
        if let Some(disabled) = map.get("disabled").and_then(Value::as_bool) {
            manifest.disabled = disabled;
        }
        if let Some(commands) = map.get("commands").and_then(Value::as_bool) {
            manifest.commands = commands;
        }
        if let Some(config) = map.get("config").and_then(Value::as_object) {
            manifest.config = config.clone();
        }
        if let Some(components) = map.get("components").and_then(Value::as_object) {
            for (name, definition) in components {
                let definition = ComponentDefinition::from_value(definition).map_err(|e| {
                    PluginSystemError::InvalidManifest {
                        id: id.to_string(),
                        reason: format!("component '{}': {}", name, e),
                    }
                })?;
                manifest.components.insert(name.clone(), definition);
            }
        }
        Ok(manifest)
    }
}

/// Builder for creating a plugin manifest
pub struct ManifestBuilder {
    manifest: PluginManifest,
}

impl ManifestBuilder {
    /// Create a new manifest builder
    pub fn new(id: &str, path: &str) -> Self {
        Self {
            manifest: PluginManifest::new(id, path),
        }
    }

    /// Set the entry file
    pub fn file(mut self, file: &str) -> Self {
        self.manifest.file = file.to_string();
        self
    }

    /// Set the plugin alias
    pub fn alias(mut self, alias: &str) -> Self {
        self.manifest.alias = Some(alias.to_string());
        self
    }

    /// Mark the plugin disabled
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.manifest.disabled = disabled;
        self
    }

    /// Set whether the plugin's commands are loaded
    pub fn commands(mut self, commands: bool) -> Self {
        self.manifest.commands = commands;
        self
    }

    /// Add a free-form configuration value
    pub fn config_value(mut self, key: &str, value: Value) -> Self {
        self.manifest.config.insert(key.to_string(), value);
        self
    }

    /// Contribute a component definition
    pub fn component(mut self, name: &str, definition: ComponentDefinition) -> Self {
        self.manifest.components.insert(name.to_string(), definition);
        self
    }

    /// Build the manifest
    pub fn build(self) -> PluginManifest {
        self.manifest
    }
}
