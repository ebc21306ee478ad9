use async_trait::async_trait;
use serde_json::Value;

use crate::config::error::ConfigError;
use crate::config::schema::{FieldSchema, Rule, Schema, ValueType};
use crate::config::tree::ConfigTree;
use crate::config::validator::ConfigValidator;
use crate::kernel::constants::EVENTS_KEY;
use crate::kernel::context::AppContext;
use crate::kernel::error::Result;

/// Attaches configuration-declared event handlers to the application.
///
/// The `events` field maps an event name to a handler reference: either a
/// plain string naming a registered handler or `{ "handler": ..., "data":
/// ... }` to bind payload data. References resolve through the context's
/// handler registry.
pub struct EventsValidator;

#[async_trait]
impl ConfigValidator for EventsValidator {
    fn name(&self) -> &'static str {
        "events"
    }

    // Computed against the current tree: the field may only exist after
    // earlier validators expanded their sections.
    fn property_names(&self, tree: &ConfigTree) -> Vec<String> {
        tree.keys()
            .into_iter()
            .filter(|key| key.as_str() == EVENTS_KEY)
            .collect()
    }

    fn schema(&self) -> Option<Schema> {
        Some(Schema::new("events").entries(
            FieldSchema::new("event declaration")
                .rule(Rule::any_of_types(vec![ValueType::String, ValueType::Object])),
        ))
    }

    async fn apply(&self, ctx: &mut AppContext, path: &str, value: Value) -> Result<Value> {
        let Some(entries) = value.as_object() else {
            return Err(ConfigError::UnknownDeclaration {
                key: path.to_string(),
                details: "events must be a map of declarations".to_string(),
            }
            .into());
        };

        for (event_name, declaration) in entries {
            let (handler_ref, data) = parse_declaration(event_name, declaration)?;
            let handler = ctx.handlers().get(&handler_ref).ok_or_else(|| {
                ConfigError::UnknownHandlerRef {
                    name: handler_ref.clone(),
                }
            })?;
            ctx.attachments_mut().on(event_name, handler, data);
            log::debug!(
                "Attached handler '{}' for event '{}'",
                handler_ref,
                event_name
            );
        }

        Ok(value)
    }
}

fn parse_declaration(event_name: &str, declaration: &Value) -> Result<(String, Option<Value>)> {
    match declaration {
        Value::String(handler_ref) => Ok((handler_ref.clone(), None)),
        Value::Object(map) => {
            let handler_ref = map.get("handler").and_then(Value::as_str).ok_or_else(|| {
                ConfigError::UnknownDeclaration {
                    key: event_name.to_string(),
                    details: "event declaration requires a string member 'handler'".to_string(),
                }
            })?;
            Ok((handler_ref.to_string(), map.get("data").cloned()))
        }
        _ => Err(ConfigError::UnknownDeclaration {
            key: event_name.to_string(),
            details: "expected a handler reference or a {handler, data} object".to_string(),
        }
        .into()),
    }
}
