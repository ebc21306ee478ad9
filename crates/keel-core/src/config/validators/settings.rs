use async_trait::async_trait;
use serde_json::Value;

use crate::config::error::ConfigError;
use crate::config::schema::camel_case;
use crate::config::tree::ConfigTree;
use crate::config::validator::ConfigValidator;
use crate::kernel::context::AppContext;
use crate::kernel::error::Result;

/// Enforces the lower-camel-case naming invariant on every top-level
/// configuration key before any other validator side-effects the
/// application.
pub struct SettingsValidator;

#[async_trait]
impl ConfigValidator for SettingsValidator {
    fn name(&self) -> &'static str {
        "settings"
    }

    fn property_names(&self, _tree: &ConfigTree) -> Vec<String> {
        // Owns no subtree; the naming check covers the whole top level.
        Vec::new()
    }

    async fn before_process(&self, _ctx: &mut AppContext, tree: &mut ConfigTree) -> Result<()> {
        for key in tree.keys() {
            if !camel_case().is_match(&key) {
                return Err(ConfigError::InvalidPropertyName { name: key }.into());
            }
        }
        Ok(())
    }

    async fn apply(&self, _ctx: &mut AppContext, _path: &str, value: Value) -> Result<Value> {
        Ok(value)
    }
}
