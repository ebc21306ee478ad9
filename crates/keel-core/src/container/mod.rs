//! # Keel Core Object Factory / Service Container
//!
//! Create-and-memoize services: component definitions describe how to build
//! a named service, an explicit class registry maps symbolic class names to
//! factory functions, and the [`ServiceContainer`] builds instances lazily
//! on first access, memoizing singletons and arbitrary keyed values.

pub mod class_registry;
pub mod component;
pub mod definition;
pub mod error;
pub mod service;

pub use class_registry::{ClassRef, ClassRegistry, ComponentCtor, FactoryFuture};
pub use component::Component;
pub use definition::ComponentDefinition;
pub use error::ContainerError;
pub use service::{MemoOptions, ServiceContainer, SharedComponent};

// Test module declaration
#[cfg(test)]
mod tests;
