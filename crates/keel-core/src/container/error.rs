//! Error types specific to the object factory and service container.

use thiserror::Error;

use crate::alias::error::AliasSystemError;

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("Class reference '{reference}' does not resolve to a registered factory")]
    ClassResolution { reference: String },

    #[error("Unknown property '{property}' for component class '{class}'")]
    UnknownProperty { class: String, property: String },

    #[error("No component registered under name '{name}'")]
    ComponentNotFound { name: String },

    #[error("Circular dependency detected while constructing '{name}' ({chain})")]
    CircularDependency { name: String, chain: String },

    #[error("Memoized entry '{key}' is frozen and cannot be overwritten")]
    FrozenEntry { key: String },

    #[error("Invalid component definition: {reason}")]
    InvalidDefinition { reason: String },

    #[error("Component '{name}' failed to initialize: {reason}")]
    InitFailure { name: String, reason: String },

    #[error("Alias resolution failed: {0}")]
    Alias(#[from] AliasSystemError),
}
