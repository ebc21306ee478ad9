//! Error types specific to the configuration system.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Schema violation. `path` is the machine-readable field path;
    /// `message` is rendered from the first violated rule's template.
    #[error("Config validation failed at '{path}': {message}")]
    Validation { path: String, message: String },

    #[error("Configuration key '{name}' does not match the required naming pattern")]
    InvalidPropertyName { name: String },

    #[error("Malformed declaration '{key}': {details}")]
    UnknownDeclaration { key: String, details: String },

    #[error("Configuration references unknown event handler '{name}'")]
    UnknownHandlerRef { name: String },

    #[error("Configuration references unknown behavior '{name}'")]
    UnknownBehaviorRef { name: String },

    #[error("Failed to deserialize configuration from {format}: {reason}")]
    Deserialize { format: String, reason: String },

    #[error("Failed to serialize configuration to {format}: {reason}")]
    Serialize { format: String, reason: String },

    #[error("Unknown or unsupported config format for path: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("Failed to read configuration file '{path}': {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Configuration root must be an object")]
    NotAnObject,
}
