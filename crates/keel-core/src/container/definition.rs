use serde_json::{Map, Value};

use crate::container::error::ContainerError;

/// Declarative record describing how to build a named service:
/// a symbolic class reference plus property overrides assigned to the
/// fresh instance.
#[derive(Debug, Clone)]
pub struct ComponentDefinition {
    /// Symbolic class name; may be alias-prefixed.
    pub class: String,
    /// Constructor arguments handed to the factory. `Null` when none.
    pub args: Value,
    /// Property overrides assigned after construction.
    pub props: Map<String, Value>,
}

impl ComponentDefinition {
    pub fn new(class: &str) -> Self {
        Self {
            class: class.to_string(),
            args: Value::Null,
            props: Map::new(),
        }
    }

    /// Set the constructor arguments.
    pub fn with_args(mut self, args: Value) -> Self {
        self.args = args;
        self
    }

    /// Add a property override.
    pub fn prop(mut self, name: &str, value: Value) -> Self {
        self.props.insert(name.to_string(), value);
        self
    }

    /// Build a definition from a configuration value.
    ///
    /// A string is class-only shorthand; an object requires a string
    /// `class` member and treats every other member as a property override.
    pub fn from_value(value: &Value) -> Result<Self, ContainerError> {
        match value {
            Value::String(class) => Ok(Self::new(class)),
            Value::Object(map) => {
                let class = map.get("class").and_then(Value::as_str).ok_or_else(|| {
                    ContainerError::InvalidDefinition {
                        reason: "missing required string member 'class'".to_string(),
                    }
                })?;
                let mut definition = Self::new(class);
                for (name, prop) in map {
                    if name != "class" {
                        definition.props.insert(name.clone(), prop.clone());
                    }
                }
                Ok(definition)
            }
            other => Err(ContainerError::InvalidDefinition {
                reason: format!("expected string or object, got {}", value_kind(other)),
            }),
        }
    }

    /// Normalized object form: `{ "class": ..., ...props }`.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("class".to_string(), Value::String(self.class.clone()));
        for (name, prop) in &self.props {
            map.insert(name.clone(), prop.clone());
        }
        Value::Object(map)
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
