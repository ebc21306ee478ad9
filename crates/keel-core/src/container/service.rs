use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::sync::Mutex;

use crate::alias::registry::AliasRegistry;
use crate::container::class_registry::{ClassRef, ClassRegistry, ComponentCtor};
use crate::container::component::Component;
use crate::container::definition::ComponentDefinition;
use crate::container::error::ContainerError;

/// A live component instance shared out of the container.
pub type SharedComponent = Arc<Mutex<Box<dyn Component>>>;

/// Options for [`ServiceContainer::memo_sync`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoOptions {
    /// Once memoized, the value can never be overwritten.
    pub freeze: bool,
}

impl MemoOptions {
    pub fn frozen() -> Self {
        Self { freeze: true }
    }
}

#[derive(Debug)]
struct MemoEntry {
    value: Value,
    frozen: bool,
}

/// Create-and-memoize service container.
///
/// Holds the component definitions, the explicit class registry, at most
/// one live instance per component name, and a keyed memo cache for ad-hoc
/// values. Instances are created lazily on first `get`, never eagerly at
/// registration time.
///
/// The container is the only shared mutable state in the core; the whole
/// bootstrap runs on a single logical thread, so correctness does not
/// depend on locking. Re-entrant construction of the same name is detected
/// through the construction stack and fails fast.
#[derive(Debug)]
pub struct ServiceContainer {
    aliases: Arc<Mutex<AliasRegistry>>,
    classes: ClassRegistry,
    definitions: HashMap<String, ComponentDefinition>,
    instances: HashMap<String, SharedComponent>,
    memo: HashMap<String, MemoEntry>,
    building: Vec<String>,
}

impl ServiceContainer {
    pub fn new(aliases: Arc<Mutex<AliasRegistry>>) -> Self {
        Self {
            aliases,
            classes: ClassRegistry::new(),
            definitions: HashMap::new(),
            instances: HashMap::new(),
            memo: HashMap::new(),
            building: Vec::new(),
        }
    }

    pub fn classes(&self) -> &ClassRegistry {
        &self.classes
    }

    /// Register a component factory under a symbolic class name.
    pub fn register_class(&mut self, name: &str, ctor: Arc<ComponentCtor>) {
        self.classes.register(name, ctor);
    }

    /// Register a non-suspending factory under a symbolic class name.
    pub fn register_class_fn<F>(&mut self, name: &str, ctor: F)
    where
        F: Fn(Value) -> Result<Box<dyn Component>, ContainerError> + Send + Sync + 'static,
    {
        self.classes.register_fn(name, ctor);
    }

    /// Register a component definition. Replacing a definition does not
    /// evict an instance already built from the old one; `flush` first.
    pub fn set_definition(&mut self, name: &str, definition: ComponentDefinition) {
        log::debug!(
            "Registered component definition '{}' (class '{}')",
            name,
            definition.class
        );
        self.definitions.insert(name.to_string(), definition);
    }

    pub fn definition(&self, name: &str) -> Option<&ComponentDefinition> {
        self.definitions.get(name)
    }

    pub fn has_definition(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Registered component names, unordered.
    pub fn definition_names(&self) -> Vec<&str> {
        self.definitions.keys().map(String::as_str).collect()
    }

    /// Get the named component, building it from its definition on first
    /// access.
    ///
    /// Two calls with the same name and no intervening `flush` return the
    /// identical instance.
    pub async fn get(&mut self, name: &str) -> Result<SharedComponent, ContainerError> {
        if let Some(instance) = self.instances.get(name) {
            return Ok(Arc::clone(instance));
        }

        let definition = self.definitions.get(name).cloned().ok_or_else(|| {
            ContainerError::ComponentNotFound {
                name: name.to_string(),
            }
        })?;

        if self.building.iter().any(|building| building == name) {
            let mut chain = self.building.join(" -> ");
            chain.push_str(" -> ");
            chain.push_str(name);
            return Err(ContainerError::CircularDependency {
                name: name.to_string(),
                chain,
            });
        }

        self.building.push(name.to_string());
        let built = self
            .create_object(
                ClassRef::Name(definition.class.clone()),
                definition.args.clone(),
                definition.props.clone(),
            )
            .await;
        self.building.pop();

        let instance = built?;
        self.instances.insert(name.to_string(), Arc::clone(&instance));
        log::debug!("Built component '{}'", name);
        Ok(instance)
    }

    /// Build a fully initialized instance from a class reference,
    /// constructor arguments, and property overrides.
    ///
    /// Symbolic names pass through alias resolution (non-throwing; plain
    /// names are used as-is) before the class registry lookup. Property
    /// assignment rejects unknown names unless the instance is permissive.
    /// The `init` lifecycle hook runs last; a partially constructed
    /// instance is never returned.
    pub async fn create_object(
        &mut self,
        class: ClassRef,
        args: Value,
        props: Map<String, Value>,
    ) -> Result<SharedComponent, ContainerError> {
        let ctor = match class {
            ClassRef::Factory(ctor) => ctor,
            ClassRef::Name(name) => {
                let resolved = self.aliases.lock().await.resolve(&name, false)?;
                self.classes
                    .get(&resolved)
                    .ok_or(ContainerError::ClassResolution {
                        reference: resolved,
                    })?
            }
        };

        let mut instance = (*ctor)(self, args).await?;

        for (prop_name, prop_value) in props {
            match instance.set_property(&prop_name, prop_value) {
                Ok(()) => {}
                Err(ContainerError::UnknownProperty { .. }) if instance.permissive() => {}
                Err(e) => return Err(e),
            }
        }

        instance.init().await?;
        Ok(Arc::new(Mutex::new(instance)))
    }

    /// Memoize an arbitrary value under `key`. Overwriting a frozen entry
    /// fails with [`ContainerError::FrozenEntry`].
    pub fn memo_sync(
        &mut self,
        key: &str,
        value: Value,
        opts: MemoOptions,
    ) -> Result<(), ContainerError> {
        if let Some(entry) = self.memo.get(key) {
            if entry.frozen {
                return Err(ContainerError::FrozenEntry {
                    key: key.to_string(),
                });
            }
        }
        self.memo.insert(
            key.to_string(),
            MemoEntry {
                value,
                frozen: opts.freeze,
            },
        );
        Ok(())
    }

    /// Memoize the value produced by `make`, evaluated only when `key` is
    /// absent.
    pub fn memo_sync_with<F>(
        &mut self,
        key: &str,
        make: F,
        opts: MemoOptions,
    ) -> Result<(), ContainerError>
    where
        F: FnOnce() -> Value,
    {
        if self.memo.contains_key(key) {
            return Ok(());
        }
        self.memo_sync(key, make(), opts)
    }

    /// Read a memoized value.
    pub fn retrieve(&self, key: &str) -> Option<Value> {
        self.memo.get(key).map(|entry| entry.value.clone())
    }

    /// Remove a memoized entry or a cached instance. Silent when absent.
    pub fn flush(&mut self, key: &str) {
        self.memo.remove(key);
        self.instances.remove(key);
    }

    /// Drop every memoized value and cached instance. Definitions and
    /// registered classes survive.
    pub fn flush_all(&mut self) {
        self.memo.clear();
        self.instances.clear();
    }

    /// Number of live component instances.
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }
}
