use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use crate::config::pipeline::ValidationPipeline;
use crate::config::tree::ConfigTree;
use crate::config::validator::ConfigValidator;
use crate::container::class_registry::ComponentCtor;
use crate::container::component::Component;
use crate::container::error::ContainerError;
use crate::container::service::SharedComponent;
use crate::event::behavior::Behavior;
use crate::event::emitter::{Event, EventHandlerFn, HandlerId};
use crate::kernel::constants;
use crate::kernel::context::AppContext;
use crate::kernel::error::{Error, LifecyclePhase, Result};

/// The hosting application.
///
/// Owns the [`AppContext`], the raw configuration tree, and the validation
/// pipeline. The expected flow: create the application, populate the
/// symbolic registries (classes, handlers, behaviors, aliases), run
/// [`Application::bootstrap`] once, then pull components out lazily.
///
/// Any error surfacing from `bootstrap` is a fatal startup failure; the
/// caller is expected to log the formatted message and terminate with a
/// non-zero exit.
pub struct Application {
    context: AppContext,
    config: ConfigTree,
    pipeline: ValidationPipeline,
    initialized: bool,
}

impl Application {
    /// Create an application rooted at `base_path` with the given raw
    /// configuration and the built-in validator order.
    pub fn new(base_path: &str, config: ConfigTree) -> Self {
        log::info!(
            "Initializing {} v{}",
            constants::APP_NAME,
            constants::APP_VERSION
        );
        Self {
            context: AppContext::new(base_path),
            config,
            pipeline: ValidationPipeline::with_core_validators(),
            initialized: false,
        }
    }

    /// Create an application from a configuration file; the format is
    /// inferred from the file extension.
    pub async fn from_file(base_path: &str, config_path: &Path) -> Result<Self> {
        let config = ConfigTree::load(config_path).await?;
        Ok(Self::new(base_path, config))
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut AppContext {
        &mut self.context
    }

    /// The configuration tree; normalized in place once `bootstrap` ran.
    pub fn config(&self) -> &ConfigTree {
        &self.config
    }

    pub fn pipeline(&self) -> &ValidationPipeline {
        &self.pipeline
    }

    /// Append a validator after the built-in order. Only meaningful before
    /// `bootstrap`.
    pub fn add_validator(&mut self, validator: Box<dyn ConfigValidator>) {
        self.pipeline.add_validator(validator);
    }

    /// Register a component factory under a symbolic class name.
    pub async fn register_class(&self, name: &str, ctor: Arc<ComponentCtor>) {
        self.context.container().lock().await.register_class(name, ctor);
    }

    /// Register a non-suspending component factory.
    pub async fn register_class_fn<F>(&self, name: &str, ctor: F)
    where
        F: Fn(Value) -> std::result::Result<Box<dyn Component>, ContainerError>
            + Send
            + Sync
            + 'static,
    {
        self.context
            .container()
            .lock()
            .await
            .register_class_fn(name, ctor);
    }

    /// Register an event handler under a symbolic name for configuration
    /// references.
    pub fn register_handler(&mut self, name: &str, handler: Arc<EventHandlerFn>) {
        self.context.handlers_mut().register(name, handler);
    }

    /// Register a behavior under a symbolic name for configuration
    /// references.
    pub fn register_behavior(&mut self, name: &str, behavior: Arc<dyn Behavior>) {
        self.context.behavior_defs_mut().register(name, behavior);
    }

    /// Register a non-root alias.
    pub async fn set_alias(&self, name: &str, target: &str) -> Result<()> {
        self.context.set_alias(name, target).await?;
        Ok(())
    }

    /// Resolve an alias through the registry.
    pub async fn resolve_alias(&self, input: &str, throw_on_missing: bool) -> Result<String> {
        Ok(self.context.resolve_alias(input, throw_on_missing).await?)
    }

    /// Run the validation pipeline over the configuration tree, exactly
    /// once. Previously applied validators' effects are left intact when a
    /// later validator fails; there is no rollback.
    pub async fn bootstrap(&mut self) -> Result<()> {
        if self.initialized {
            return Err(Error::Lifecycle {
                phase: LifecyclePhase::Bootstrap,
                message: "application already bootstrapped".to_string(),
            });
        }

        let Application {
            context,
            config,
            pipeline,
            ..
        } = self;
        pipeline.run(context, config).await?;

        self.initialized = true;
        log::info!(
            "Bootstrap complete ({} plugin(s) installed)",
            self.context.plugins().len()
        );
        Ok(())
    }

    /// Get the named component, building it lazily on first access.
    pub async fn component(&self, name: &str) -> Result<SharedComponent> {
        let container = self.context.container();
        let mut container = container.lock().await;
        Ok(container.get(name).await?)
    }

    /// Trigger an event on the application instance.
    pub async fn trigger(&self, event_name: &str, event: Option<Event>) -> Result<()> {
        self.context
            .attachments()
            .trigger(event_name, event)
            .await?;
        Ok(())
    }

    /// Attach an event handler to the application instance.
    pub fn on(
        &mut self,
        event_name: &str,
        handler: Arc<EventHandlerFn>,
        data: Option<Value>,
    ) -> HandlerId {
        self.context.attachments_mut().on(event_name, handler, data)
    }

    /// Attach a behavior to the application instance.
    pub fn attach_behavior(&mut self, name: &str, behavior: Arc<dyn Behavior>) {
        self.context.attachments_mut().attach_behavior(name, behavior);
    }

    /// Tear the context down. The application can not be bootstrapped
    /// again afterwards; create a fresh one instead.
    pub async fn shutdown(&mut self) -> Result<()> {
        if !self.initialized {
            return Err(Error::Lifecycle {
                phase: LifecyclePhase::Shutdown,
                message: "application is not bootstrapped".to_string(),
            });
        }
        self.context.teardown().await;
        self.initialized = false;
        log::info!("Application shut down");
        Ok(())
    }

    /// Returns whether the application has been bootstrapped.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}
