use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::alias::registry::ALIAS_MARKER;
use crate::config::error::ConfigError;
use crate::config::schema::{FieldSchema, Rule, Schema, ValueType, camel_case};
use crate::config::tree::ConfigTree;
use crate::config::validator::ConfigValidator;
use crate::kernel::constants::PLUGINS_KEY;
use crate::kernel::context::AppContext;
use crate::kernel::error::Result;
use crate::plugin::manifest::PluginManifest;

/// Validates plugin metadata, fills declared defaults, and installs every
/// enabled plugin: registers its manifest, registers its alias, and merges
/// its component definitions into the container.
///
/// Disabled plugins are kept in the normalized tree but contribute nothing.
pub struct PluginsValidator;

#[async_trait]
impl ConfigValidator for PluginsValidator {
    fn name(&self) -> &'static str {
        "plugins"
    }

    fn property_names(&self, _tree: &ConfigTree) -> Vec<String> {
        vec![PLUGINS_KEY.to_string()]
    }

    fn schema(&self) -> Option<Schema> {
        Some(
            Schema::new("plugins")
                .key_pattern(camel_case())
                .entries(
                    FieldSchema::new("plugin")
                        .rule(Rule::of_type(ValueType::Object))
                        .nested(PluginManifest::schema()),
                ),
        )
    }

    async fn apply(&self, ctx: &mut AppContext, path: &str, value: Value) -> Result<Value> {
        let Some(entries) = value.as_object() else {
            return Err(ConfigError::UnknownDeclaration {
                key: path.to_string(),
                details: "plugins must be a map of plugin entries".to_string(),
            }
            .into());
        };

        let schema = PluginManifest::schema();
        let mut normalized = Map::new();
        for (id, entry) in entries {
            let mut entry = entry.clone();
            schema.apply_defaults(&mut entry);
            let manifest = PluginManifest::from_value(id, &entry)?;
            normalized.insert(id.clone(), entry);

            if manifest.disabled {
                log::info!("Plugin '{}' is disabled, skipping", id);
                continue;
            }

            if let Some(alias) = &manifest.alias {
                let target = ctx.resolve_alias(&manifest.path, true).await?;
                ctx.set_alias(&format!("{}{}", ALIAS_MARKER, alias), &target)
                    .await?;
            }

            if !manifest.components.is_empty() {
                let container = ctx.container();
                let mut container = container.lock().await;
                for (name, definition) in &manifest.components {
                    container.set_definition(name, definition.clone());
                }
            }

            log::info!("Installed plugin '{}'", id);
            ctx.plugins_mut().register(manifest)?;
        }

        Ok(Value::Object(normalized))
    }
}
