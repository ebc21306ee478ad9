use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::sync::Mutex;

use crate::alias::error::AliasSystemError;
use crate::alias::registry::AliasRegistry;
use crate::container::service::ServiceContainer;
use crate::event::registry::{BehaviorRegistry, HandlerRegistry};
use crate::event::Attachments;
use crate::kernel::constants;
use crate::plugin::registry::PluginRegistry;

/// A child module registered on the application before later validators
/// reference it.
#[derive(Debug, Clone)]
pub struct ModuleDefinition {
    pub id: String,
    pub config: Map<String, Value>,
}

/// The explicit context object handed to every subsystem.
///
/// It owns the alias registry, the service container, the symbolic
/// handler/behavior registries, the application's own event/behavior
/// attachment point, the module table, and the plugin registry.
///
/// Single-owner lifecycle: created once by `Application::new` at bootstrap
/// and torn down once through [`AppContext::teardown`] at shutdown. The
/// shared pieces are mutex-guarded, but the whole bootstrap runs on one
/// logical thread; the guards only make sharing with factories possible.
#[derive(Debug)]
pub struct AppContext {
    aliases: Arc<Mutex<AliasRegistry>>,
    container: Arc<Mutex<ServiceContainer>>,
    handlers: HandlerRegistry,
    behavior_defs: BehaviorRegistry,
    attachments: Attachments,
    modules: HashMap<String, ModuleDefinition>,
    plugins: PluginRegistry,
}

impl AppContext {
    /// Create a context rooted at `base_path`.
    ///
    /// Registers the immutable root aliases (`@app`, `@runtime`) and seeds
    /// the ignore list with the reserved package-registry names.
    pub fn new(base_path: &str) -> Self {
        let mut aliases = AliasRegistry::with_roots([
            (constants::APP_ALIAS, base_path.to_string()),
            (
                constants::RUNTIME_ALIAS,
                format!("{}/{}", base_path, constants::RUNTIME_DIR),
            ),
        ]);
        for name in constants::IGNORED_ALIASES {
            aliases.ignore(name);
        }
        let aliases = Arc::new(Mutex::new(aliases));
        let container = Arc::new(Mutex::new(ServiceContainer::new(Arc::clone(&aliases))));

        Self {
            aliases,
            container,
            handlers: HandlerRegistry::new(),
            behavior_defs: BehaviorRegistry::new(),
            attachments: Attachments::new(),
            modules: HashMap::new(),
            plugins: PluginRegistry::new(),
        }
    }

    /// Handle to the alias registry.
    pub fn aliases(&self) -> Arc<Mutex<AliasRegistry>> {
        Arc::clone(&self.aliases)
    }

    /// Handle to the service container.
    pub fn container(&self) -> Arc<Mutex<ServiceContainer>> {
        Arc::clone(&self.container)
    }

    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    pub fn handlers_mut(&mut self) -> &mut HandlerRegistry {
        &mut self.handlers
    }

    pub fn behavior_defs(&self) -> &BehaviorRegistry {
        &self.behavior_defs
    }

    pub fn behavior_defs_mut(&mut self) -> &mut BehaviorRegistry {
        &mut self.behavior_defs
    }

    /// The application's own event/behavior attachment point.
    pub fn attachments(&self) -> &Attachments {
        &self.attachments
    }

    pub fn attachments_mut(&mut self) -> &mut Attachments {
        &mut self.attachments
    }

    pub fn modules(&self) -> &HashMap<String, ModuleDefinition> {
        &self.modules
    }

    /// Register a child module, replacing any module with the same id.
    pub fn register_module(&mut self, module: ModuleDefinition) {
        log::debug!("Registered module '{}'", module.id);
        self.modules.insert(module.id.clone(), module);
    }

    pub fn plugins(&self) -> &PluginRegistry {
        &self.plugins
    }

    pub fn plugins_mut(&mut self) -> &mut PluginRegistry {
        &mut self.plugins
    }

    /// Resolve an alias through the registry.
    pub async fn resolve_alias(
        &self,
        input: &str,
        throw_on_missing: bool,
    ) -> Result<String, AliasSystemError> {
        self.aliases.lock().await.resolve(input, throw_on_missing)
    }

    /// Register a non-root alias.
    pub async fn set_alias(&self, name: &str, target: &str) -> Result<(), AliasSystemError> {
        self.aliases.lock().await.register(name, target)
    }

    /// Tear the context down: flush every live instance and memoized value.
    /// Definitions, classes, and aliases survive until the context drops.
    pub async fn teardown(&mut self) {
        self.container.lock().await.flush_all();
        log::info!("Application context torn down");
    }
}
