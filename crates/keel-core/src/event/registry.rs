//! Symbolic reference registries for configuration-declared handlers and
//! behaviors.
//!
//! Configuration refers to handlers and behaviors by name; the mappings are
//! populated at init time and looked up by the events/behaviors validators.
//! Nothing is ever loaded by string path at runtime.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::event::behavior::Behavior;
use crate::event::emitter::EventHandlerFn;

/// Name → event handler table.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<EventHandlerFn>>,
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handler_count", &self.handlers.len())
            .finish()
    }
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under a symbolic name, replacing any previous one.
    pub fn register(&mut self, name: &str, handler: Arc<EventHandlerFn>) {
        self.handlers.insert(name.to_string(), handler);
    }

    pub fn get(&self, name: &str) -> Option<Arc<EventHandlerFn>> {
        self.handlers.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }
}

/// Name → behavior table. Behavior instances are shared; attaching the same
/// ref to several hosts attaches the same capability object.
#[derive(Debug, Default)]
pub struct BehaviorRegistry {
    behaviors: HashMap<String, Arc<dyn Behavior>>,
}

impl BehaviorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a behavior under a symbolic name, replacing any previous one.
    pub fn register(&mut self, name: &str, behavior: Arc<dyn Behavior>) {
        self.behaviors.insert(name.to_string(), behavior);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Behavior>> {
        self.behaviors.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.behaviors.contains_key(name)
    }
}
