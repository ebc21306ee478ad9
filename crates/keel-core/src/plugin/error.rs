//! Error types specific to the plugin system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PluginSystemError {
    #[error("Plugin '{id}' is already registered")]
    DuplicatePlugin { id: String },

    #[error("No plugin registered under id '{id}'")]
    UnknownPlugin { id: String },

    #[error("Invalid manifest for plugin '{id}': {reason}")]
    InvalidManifest { id: String, reason: String },
}
