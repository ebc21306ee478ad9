use std::collections::HashMap;

use crate::plugin::error::PluginSystemError;
use crate::plugin::manifest::PluginManifest;

/// Id-keyed manifest table preserving registration order.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    plugins: HashMap<String, PluginManifest>,
    order: Vec<String>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a manifest. Duplicate ids are rejected.
    pub fn register(&mut self, manifest: PluginManifest) -> Result<(), PluginSystemError> {
        if self.plugins.contains_key(&manifest.id) {
            return Err(PluginSystemError::DuplicatePlugin {
                id: manifest.id.clone(),
            });
        }
        log::debug!("Registered plugin '{}'", manifest.id);
        self.order.push(manifest.id.clone());
        self.plugins.insert(manifest.id.clone(), manifest);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&PluginManifest> {
        self.plugins.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.plugins.contains_key(id)
    }

    /// Manifests in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &PluginManifest> {
        self.order.iter().filter_map(|id| self.plugins.get(id))
    }

    /// Enabled manifests in registration order.
    pub fn enabled(&self) -> Vec<&PluginManifest> {
        self.iter().filter(|m| !m.disabled).collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
