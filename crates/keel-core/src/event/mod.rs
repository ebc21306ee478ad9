//! # Keel Core Event & Behavior System
//!
//! Per-instance publish/subscribe plus capability-style behaviors. Every
//! object the service container builds carries an [`Attachments`] value: an
//! [`EventEmitter`] for ordered, sequential event delivery and a
//! [`BehaviorSet`] for duck-typed capability extension without inheritance.

pub mod behavior;
pub mod emitter;
pub mod error;
pub mod registry;

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

pub use behavior::{Behavior, BehaviorSet};
pub use emitter::{Event, EventEmitter, EventHandlerFn, HandlerFuture, HandlerId, sync_handler};
pub use error::EventSystemError;
pub use registry::{BehaviorRegistry, HandlerRegistry};

/// Event and behavior attachment point carried by every container-built
/// object and by the application itself.
///
/// Attaching a behavior also wires the event handlers it contributes;
/// replacing or detaching the behavior unwires them again.
#[derive(Debug, Default)]
pub struct Attachments {
    emitter: EventEmitter,
    behaviors: BehaviorSet,
    // Handler ids wired on behalf of each attached behavior.
    behavior_handlers: HashMap<String, Vec<(String, HandlerId)>>,
}

impl Attachments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emitter(&self) -> &EventEmitter {
        &self.emitter
    }

    pub fn emitter_mut(&mut self) -> &mut EventEmitter {
        &mut self.emitter
    }

    pub fn behaviors(&self) -> &BehaviorSet {
        &self.behaviors
    }

    /// Append a handler for `event_name`; see [`EventEmitter::on`].
    pub fn on(
        &mut self,
        event_name: &str,
        handler: Arc<EventHandlerFn>,
        data: Option<Value>,
    ) -> HandlerId {
        self.emitter.on(event_name, handler, data)
    }

    /// Remove all handlers for `event_name`.
    pub fn off(&mut self, event_name: &str) -> bool {
        self.emitter.off(event_name)
    }

    /// Remove one handler by id.
    pub fn off_handler(&mut self, event_name: &str, id: HandlerId) -> bool {
        self.emitter.off_handler(event_name, id)
    }

    pub fn has_event_handlers(&self, event_name: &str) -> bool {
        self.emitter.has_event_handlers(event_name)
    }

    /// Trigger an event on this instance; see [`EventEmitter::trigger`].
    pub async fn trigger(
        &self,
        event_name: &str,
        event: Option<Event>,
    ) -> Result<(), EventSystemError> {
        self.emitter.trigger(event_name, event).await
    }

    /// Attach a capability under `name`, wiring its contributed event
    /// handlers. Re-attaching replaces the previous capability and rewires.
    pub fn attach_behavior(&mut self, name: &str, behavior: Arc<dyn Behavior>) {
        self.unwire_behavior(name);
        let mut wired = Vec::new();
        for (event_name, handler) in behavior.event_handlers() {
            let id = self.emitter.on(&event_name, handler, None);
            wired.push((event_name, id));
        }
        if !wired.is_empty() {
            self.behavior_handlers.insert(name.to_string(), wired);
        }
        self.behaviors.attach(name, behavior);
    }

    /// Detach a capability and unwire its event handlers.
    pub fn detach_behavior(&mut self, name: &str) -> Option<Arc<dyn Behavior>> {
        self.unwire_behavior(name);
        self.behaviors.detach(name)
    }

    /// Whether any attached capability responds to `method`.
    pub fn responds_to(&self, method: &str) -> bool {
        self.behaviors.responds_to(method)
    }

    /// Dispatch a named call to the first capability that responds to it.
    pub async fn call(&self, method: &str, args: Value) -> Result<Value, EventSystemError> {
        self.behaviors.call(method, args).await
    }

    fn unwire_behavior(&mut self, name: &str) {
        if let Some(wired) = self.behavior_handlers.remove(name) {
            for (event_name, id) in wired {
                self.emitter.off_handler(&event_name, id);
            }
        }
    }
}
