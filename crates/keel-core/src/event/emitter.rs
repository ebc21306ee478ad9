use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;

use crate::event::error::EventSystemError;

/// Type for handler identifiers returned by [`EventEmitter::on`].
pub type HandlerId = u64;

/// An owned future produced by an event handler.
pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = Result<(), EventSystemError>> + Send + 'a>>;

/// Event handler function type. Handlers receive the envelope mutably so a
/// handler may rewrite `data` for the handlers that run after it.
pub type EventHandlerFn = dyn for<'a> Fn(&'a mut Event) -> HandlerFuture<'a> + Send + Sync;

/// Event envelope delivered to every handler registered for a name.
#[derive(Debug, Clone)]
pub struct Event {
    /// Event name; set by the emitter at trigger time.
    pub name: String,
    /// Free-form payload. Handlers may mutate it in place.
    pub data: Value,
    /// Name of the object that raised the event, when known.
    pub owner: Option<String>,
    /// Set by a handler to stop propagation without raising an error.
    pub handled: bool,
}

impl Event {
    /// Create a default envelope for `name` with a null payload.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            data: Value::Null,
            owner: None,
            handled: false,
        }
    }

    /// Create an envelope carrying an initial payload.
    pub fn with_data(name: &str, data: Value) -> Self {
        Self {
            data,
            ..Self::new(name)
        }
    }
}

struct HandlerEntry {
    id: HandlerId,
    data: Option<Value>,
    handler: Arc<EventHandlerFn>,
}

/// Per-instance publish/subscribe mechanism.
///
/// Handlers for a name run strictly in registration order, each awaited
/// before the next; there is no concurrent fan-out. Duplicate registrations
/// are additive.
pub struct EventEmitter {
    handlers: HashMap<String, Vec<HandlerEntry>>,
    next_handler_id: HandlerId,
}

impl fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handler_count: usize = self.handlers.values().map(|v| v.len()).sum();
        f.debug_struct("EventEmitter")
            .field("event_names", &self.handlers.len())
            .field("handler_count", &handler_count)
            .field("next_handler_id", &self.next_handler_id)
            .finish()
    }
}

impl EventEmitter {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            next_handler_id: 1,
        }
    }

    /// Append a handler to the ordered list for `event_name`.
    ///
    /// `data`, when supplied, is written into the envelope immediately
    /// before this handler runs.
    pub fn on(
        &mut self,
        event_name: &str,
        handler: Arc<EventHandlerFn>,
        data: Option<Value>,
    ) -> HandlerId {
        let id = self.next_handler_id;
        self.next_handler_id += 1;
        self.handlers
            .entry(event_name.to_string())
            .or_default()
            .push(HandlerEntry { id, data, handler });
        id
    }

    /// Remove every handler registered for `event_name`. Returns whether
    /// anything was removed.
    pub fn off(&mut self, event_name: &str) -> bool {
        self.handlers.remove(event_name).is_some()
    }

    /// Remove one handler by its id. Returns whether it was found.
    pub fn off_handler(&mut self, event_name: &str, id: HandlerId) -> bool {
        let Some(list) = self.handlers.get_mut(event_name) else {
            return false;
        };
        let len_before = list.len();
        list.retain(|entry| entry.id != id);
        let removed = list.len() < len_before;
        if list.is_empty() {
            self.handlers.remove(event_name);
        }
        removed
    }

    /// True iff the ordered list for `event_name` is non-empty.
    pub fn has_event_handlers(&self, event_name: &str) -> bool {
        self.handlers
            .get(event_name)
            .is_some_and(|list| !list.is_empty())
    }

    /// Number of handlers currently registered for `event_name`.
    pub fn handler_count(&self, event_name: &str) -> usize {
        self.handlers.get(event_name).map_or(0, |list| list.len())
    }

    /// Invoke every handler registered for `event_name` in registration
    /// order, sequentially.
    ///
    /// A default envelope is built when none is supplied. A handler error
    /// stops propagation and surfaces to the caller; a handler setting
    /// `handled` stops propagation quietly. Resolves to no value.
    pub async fn trigger(
        &self,
        event_name: &str,
        event: Option<Event>,
    ) -> Result<(), EventSystemError> {
        let entries: Vec<(Option<Value>, Arc<EventHandlerFn>)> = match self.handlers.get(event_name)
        {
            Some(list) => list
                .iter()
                .map(|entry| (entry.data.clone(), entry.handler.clone()))
                .collect(),
            None => return Ok(()),
        };

        let mut event = event.unwrap_or_else(|| Event::new(event_name));
        event.name = event_name.to_string();

        for (data, handler) in entries {
            if let Some(bound) = data {
                event.data = bound;
            }
            (*handler)(&mut event).await?;
            if event.handled {
                break;
            }
        }
        Ok(())
    }
}

impl Default for EventEmitter {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper to adapt a synchronous closure to the async handler type.
pub fn sync_handler<F>(f: F) -> Arc<EventHandlerFn>
where
    F: Fn(&mut Event) -> Result<(), EventSystemError> + Send + Sync + 'static,
{
    Arc::new(move |event| {
        let result = f(event);
        Box::pin(async move { result })
    })
}
