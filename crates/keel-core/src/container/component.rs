use std::any::Any;
use std::fmt::Debug;

use async_trait::async_trait;
use serde_json::Value;

use crate::container::error::ContainerError;
use crate::event::Attachments;

/// Core trait for every object the service container builds.
///
/// Components are long-lived named services. Each instance carries an
/// [`Attachments`] value giving it per-instance publish/subscribe and
/// capability-style behaviors.
#[async_trait]
pub trait Component: Any + Send + Sync + Debug {
    /// Symbolic class name this instance was built from.
    fn type_name(&self) -> &str;

    /// The instance's event/behavior attachment point.
    fn attachments(&self) -> &Attachments;
    fn attachments_mut(&mut self) -> &mut Attachments;

    /// Assign a configured property override.
    ///
    /// The default rejects every name; components declare the properties
    /// they accept by overriding this.
    fn set_property(&mut self, name: &str, value: Value) -> Result<(), ContainerError> {
        let _ = value;
        Err(ContainerError::UnknownProperty {
            class: self.type_name().to_string(),
            property: name.to_string(),
        })
    }

    /// A permissive component tolerates unknown property names instead of
    /// failing construction.
    fn permissive(&self) -> bool {
        false
    }

    /// Lifecycle hook invoked after all properties are assigned. The
    /// container never returns a partially constructed instance.
    async fn init(&mut self) -> Result<(), ContainerError> {
        Ok(())
    }

    /// Cast to `Any` for downcasting to the concrete type.
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
