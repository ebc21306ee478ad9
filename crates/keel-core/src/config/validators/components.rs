use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::config::error::ConfigError;
use crate::config::schema::{FieldSchema, Rule, Schema, ValueType, camel_case};
use crate::config::tree::ConfigTree;
use crate::config::validator::ConfigValidator;
use crate::container::definition::ComponentDefinition;
use crate::kernel::constants::COMPONENTS_KEY;
use crate::kernel::context::AppContext;
use crate::kernel::error::Result;

/// Expands component definitions, registers them with the service
/// container, and writes the normalized map back into the tree.
///
/// A string entry is class-only shorthand and is expanded to object form,
/// so later validators observe `{ "class": ... }` for every component.
pub struct ComponentsValidator;

#[async_trait]
impl ConfigValidator for ComponentsValidator {
    fn name(&self) -> &'static str {
        "components"
    }

    fn property_names(&self, _tree: &ConfigTree) -> Vec<String> {
        vec![COMPONENTS_KEY.to_string()]
    }

    fn schema(&self) -> Option<Schema> {
        Some(
            Schema::new("components")
                .key_pattern(camel_case())
                .entries(
                    FieldSchema::new("component definition")
                        .rule(Rule::any_of_types(vec![ValueType::String, ValueType::Object])),
                ),
        )
    }

    async fn apply(&self, ctx: &mut AppContext, path: &str, value: Value) -> Result<Value> {
        let Some(entries) = value.as_object() else {
            return Err(ConfigError::UnknownDeclaration {
                key: path.to_string(),
                details: "components must be a map of definitions".to_string(),
            }
            .into());
        };

        let container = ctx.container();
        let mut container = container.lock().await;
        let mut normalized = Map::new();
        for (name, entry) in entries {
            let definition = ComponentDefinition::from_value(entry)?;
            normalized.insert(name.clone(), definition.to_value());
            container.set_definition(name, definition);
        }
        Ok(Value::Object(normalized))
    }
}
