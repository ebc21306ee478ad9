use async_trait::async_trait;
use serde_json::Value;

use crate::config::error::ConfigError;
use crate::config::schema::{FieldSchema, Rule, Schema, ValueType};
use crate::config::tree::ConfigTree;
use crate::config::validator::ConfigValidator;
use crate::kernel::constants::BEHAVIORS_KEY;
use crate::kernel::context::AppContext;
use crate::kernel::error::Result;

/// Attaches configuration-declared behaviors to the application.
///
/// The `behaviors` field maps an attachment name to a behavior reference
/// resolved through the context's behavior registry.
pub struct BehaviorsValidator;

#[async_trait]
impl ConfigValidator for BehaviorsValidator {
    fn name(&self) -> &'static str {
        "behaviors"
    }

    // Computed against the current tree, like the events validator.
    fn property_names(&self, tree: &ConfigTree) -> Vec<String> {
        tree.keys()
            .into_iter()
            .filter(|key| key.as_str() == BEHAVIORS_KEY)
            .collect()
    }

    fn schema(&self) -> Option<Schema> {
        Some(Schema::new("behaviors").entries(
            FieldSchema::new("behavior reference").rule(Rule::of_type(ValueType::String)),
        ))
    }

    async fn apply(&self, ctx: &mut AppContext, path: &str, value: Value) -> Result<Value> {
        let Some(entries) = value.as_object() else {
            return Err(ConfigError::UnknownDeclaration {
                key: path.to_string(),
                details: "behaviors must be a map of references".to_string(),
            }
            .into());
        };

        for (name, reference) in entries {
            let Some(behavior_ref) = reference.as_str() else {
                return Err(ConfigError::UnknownDeclaration {
                    key: name.clone(),
                    details: "behavior reference must be a string".to_string(),
                }
                .into());
            };
            let behavior = ctx.behavior_defs().get(behavior_ref).ok_or_else(|| {
                ConfigError::UnknownBehaviorRef {
                    name: behavior_ref.to_string(),
                }
            })?;
            ctx.attachments_mut().attach_behavior(name, behavior);
            log::debug!("Attached behavior '{}' as '{}'", behavior_ref, name);
        }

        Ok(value)
    }
}
