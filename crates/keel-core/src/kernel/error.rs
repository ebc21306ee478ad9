//! # Keel Core Kernel Errors
//!
//! Defines [`Error`], the primary enum encompassing the errors that can
//! occur during bootstrap: alias resolution failures, container and factory
//! failures, event propagation failures, configuration validation failures,
//! and kernel lifecycle problems. Every one of them is unrecoverable at the
//! point of occurrence; the bootstrap caller treats them as fatal startup
//! failures.

use std::result::Result as StdResult;

use thiserror::Error as ThisError;

use crate::alias::error::AliasSystemError;
use crate::config::error::ConfigError;
use crate::container::error::ContainerError;
use crate::event::error::EventSystemError;
use crate::plugin::error::PluginSystemError;

/// Top-level error type for the Keel kernel.
#[derive(Debug, ThisError)]
pub enum Error {
    /// Alias registry error
    #[error("Alias registry error: {0}")]
    Alias(#[from] AliasSystemError),

    /// Object factory / service container error
    #[error("Service container error: {0}")]
    Container(#[from] ContainerError),

    /// Event system error
    #[error("Event system error: {0}")]
    Event(#[from] EventSystemError),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Plugin system error
    #[error("Plugin system error: {0}")]
    Plugin(#[from] PluginSystemError),

    /// Error occurring during a specific kernel lifecycle phase.
    #[error("Kernel lifecycle error during {phase:?}: {message}")]
    Lifecycle {
        phase: LifecyclePhase,
        message: String,
    },

    /// Generic error with message
    #[error("Error: {0}")]
    Other(String),
}

/// Represents a specific phase in the kernel's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    Bootstrap,
    Validate,
    Shutdown,
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}
