//! # Keel Core Plugin Metadata
//!
//! Installable units contributing components, commands, and configuration
//! to the host application. The plugins validator checks entries against
//! [`PluginManifest::schema`], fills defaults, and merges enabled plugins'
//! component definitions into the application's registry.

pub mod error;
pub mod manifest;
pub mod registry;

pub use error::PluginSystemError;
pub use manifest::{DEFAULT_PLUGIN_FILE, ManifestBuilder, PluginManifest};
pub use registry::PluginRegistry;

// Test module declaration
#[cfg(test)]
mod tests;
