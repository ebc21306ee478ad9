use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::config::schema::{FieldSchema, Rule, Schema, ValueType, camel_case};
use crate::config::tree::ConfigTree;
use crate::config::validator::ConfigValidator;
use crate::kernel::constants::MODULES_KEY;
use crate::kernel::context::{AppContext, ModuleDefinition};
use crate::kernel::error::Result;

/// Registers child modules on the application before later validators
/// reference them.
pub struct ModulesValidator;

#[async_trait]
impl ConfigValidator for ModulesValidator {
    fn name(&self) -> &'static str {
        "modules"
    }

    fn property_names(&self, _tree: &ConfigTree) -> Vec<String> {
        vec![MODULES_KEY.to_string()]
    }

    fn schema(&self) -> Option<Schema> {
        Some(
            Schema::new("modules")
                .key_pattern(camel_case())
                .entries(FieldSchema::new("module").rule(Rule::of_type(ValueType::Object))),
        )
    }

    // Registration happens before normalization so validators further down
    // the order can already look the modules up.
    async fn before_process(&self, ctx: &mut AppContext, tree: &mut ConfigTree) -> Result<()> {
        let Some(Value::Object(entries)) = tree.get(MODULES_KEY) else {
            return Ok(());
        };
        for (id, config) in entries {
            ctx.register_module(ModuleDefinition {
                id: id.clone(),
                config: config.as_object().cloned().unwrap_or_else(Map::new),
            });
        }
        Ok(())
    }

    async fn apply(&self, _ctx: &mut AppContext, _path: &str, value: Value) -> Result<Value> {
        // Shape was enforced by the schema; entries are already in object
        // form.
        Ok(value)
    }
}
