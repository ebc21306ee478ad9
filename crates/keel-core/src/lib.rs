//! # Keel Core
//!
//! Core library for the Keel application bootstrap engine. It provides the
//! substrate the surrounding tooling builds on: symbolic path aliases, a
//! schema-driven configuration validation pipeline, a lazy service container
//! backed by an explicit class registry, and a per-instance event/behavior
//! system attached to every object the container builds.

pub mod alias;
pub mod config;
pub mod container;
pub mod event;
pub mod kernel;
pub mod plugin;

// Re-export key public types for easier use by the binary and embedders.
pub use alias::AliasRegistry;
pub use config::{ConfigTree, ConfigValidator, Schema, ValidationPipeline};
pub use container::{Component, ComponentDefinition, ServiceContainer};
pub use event::{Attachments, Behavior, Event, EventEmitter};
pub use kernel::error::Error as KernelError;
pub use kernel::{AppContext, Application};
pub use plugin::{PluginManifest, PluginRegistry};
