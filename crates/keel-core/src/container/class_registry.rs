//! Explicit class registry.
//!
//! Symbolic class references are resolved against a mapping from name to a
//! registered factory function, populated at init time. Nothing is ever
//! loaded from a path at runtime.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;

use crate::container::component::Component;
use crate::container::error::ContainerError;
use crate::container::service::ServiceContainer;

/// An owned future produced by a component factory.
pub type FactoryFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Box<dyn Component>, ContainerError>> + Send + 'a>>;

/// Component factory function type. Factories receive the container so a
/// component may look up the services it depends on, plus its constructor
/// arguments as a JSON value.
pub type ComponentCtor =
    dyn for<'a> Fn(&'a mut ServiceContainer, Value) -> FactoryFuture<'a> + Send + Sync;

/// A class reference handed to the factory: either a symbolic name resolved
/// through the alias registry and the class registry, or a factory value
/// used directly.
#[derive(Clone)]
pub enum ClassRef {
    Name(String),
    Factory(Arc<ComponentCtor>),
}

impl fmt::Debug for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassRef::Name(name) => f.debug_tuple("Name").field(name).finish(),
            ClassRef::Factory(_) => f.debug_tuple("Factory").finish(),
        }
    }
}

impl From<&str> for ClassRef {
    fn from(name: &str) -> Self {
        ClassRef::Name(name.to_string())
    }
}

/// Name → factory table backing symbolic class resolution.
#[derive(Default)]
pub struct ClassRegistry {
    factories: HashMap<String, Arc<ComponentCtor>>,
}

impl fmt::Debug for ClassRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassRegistry")
            .field("class_count", &self.factories.len())
            .finish()
    }
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under a symbolic class name, replacing any
    /// previous registration.
    pub fn register(&mut self, name: &str, ctor: Arc<ComponentCtor>) {
        log::debug!("Registered component class '{}'", name);
        self.factories.insert(name.to_string(), ctor);
    }

    /// Convenience registration for factories that do not need container
    /// access or to suspend.
    pub fn register_fn<F>(&mut self, name: &str, ctor: F)
    where
        F: Fn(Value) -> Result<Box<dyn Component>, ContainerError> + Send + Sync + 'static,
    {
        self.register(
            name,
            Arc::new(move |_container, args| {
                let result = ctor(args);
                Box::pin(async move { result })
            }),
        );
    }

    pub fn get(&self, name: &str) -> Option<Arc<ComponentCtor>> {
        self.factories.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered class names, unordered.
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }
}
