//! Error types specific to the alias registry.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AliasSystemError {
    #[error("Unknown alias '{name}'")]
    UnknownAlias { name: String },

    #[error("Alias '{name}' is a protected root alias and cannot be redefined")]
    RootAliasOverwrite { name: String },

    #[error("Alias '{name}' is reserved and cannot be registered")]
    ReservedAlias { name: String },

    #[error("Invalid alias name '{name}': {reason}")]
    InvalidAliasName { name: String, reason: String },
}
