use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::event::emitter::EventHandlerFn;
use crate::event::error::EventSystemError;

/// A reusable capability bundle attached to a host object.
///
/// Attachment is explicit composition: the host keeps an ordered list of
/// capabilities and dispatches named calls to the first one that responds.
/// Members of the host itself are never mutated.
#[async_trait]
pub trait Behavior: Send + Sync + fmt::Debug {
    /// Whether this capability implements the named method.
    fn responds_to(&self, method: &str) -> bool;

    /// Invoke a named method with a JSON argument payload.
    async fn call(&self, method: &str, args: Value) -> Result<Value, EventSystemError>;

    /// Event subscriptions this capability contributes when attached:
    /// `(event name, handler)` pairs. Wired by the host's attachment point
    /// and unwired on detach or replacement.
    fn event_handlers(&self) -> Vec<(String, Arc<EventHandlerFn>)> {
        Vec::new()
    }
}

/// Ordered list of named capabilities with first-responder dispatch.
#[derive(Debug, Default)]
pub struct BehaviorSet {
    entries: Vec<(String, Arc<dyn Behavior>)>,
}

impl BehaviorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a capability under `name`. Re-attaching an existing name
    /// replaces the previous capability in place, keeping its dispatch
    /// position; the replaced capability is returned.
    pub fn attach(&mut self, name: &str, behavior: Arc<dyn Behavior>) -> Option<Arc<dyn Behavior>> {
        for (existing, slot) in self.entries.iter_mut() {
            if existing == name {
                return Some(std::mem::replace(slot, behavior));
            }
        }
        self.entries.push((name.to_string(), behavior));
        None
    }

    /// Detach the capability registered under `name`.
    pub fn detach(&mut self, name: &str) -> Option<Arc<dyn Behavior>> {
        let pos = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(pos).1)
    }

    /// Look up a capability by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Behavior>> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, b)| b)
    }

    /// Whether any attached capability responds to `method`.
    pub fn responds_to(&self, method: &str) -> bool {
        self.entries.iter().any(|(_, b)| b.responds_to(method))
    }

    /// Dispatch a named call to the first capability that responds to it.
    pub async fn call(&self, method: &str, args: Value) -> Result<Value, EventSystemError> {
        for (_, behavior) in &self.entries {
            if behavior.responds_to(method) {
                return behavior.call(method, args).await;
            }
        }
        Err(EventSystemError::UnknownBehaviorMethod {
            method: method.to_string(),
        })
    }

    /// Attached capability names in dispatch order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
