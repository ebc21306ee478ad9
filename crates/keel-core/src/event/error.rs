//! Error types specific to the event and behavior system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventSystemError {
    #[error("Handler for event '{event}' failed: {reason}")]
    HandlerFailure { event: String, reason: String },

    #[error("No attached behavior responds to method '{method}'")]
    UnknownBehaviorMethod { method: String },

    #[error("Behavior '{behavior}' failed while handling '{method}': {reason}")]
    BehaviorCallFailed {
        behavior: String,
        method: String,
        reason: String,
    },

    #[error("Internal event system error: {0}")]
    InternalError(String),
}
