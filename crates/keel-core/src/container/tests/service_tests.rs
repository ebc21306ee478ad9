use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::Mutex;

use crate::alias::registry::AliasRegistry;
use crate::container::class_registry::ClassRef;
use crate::container::component::Component;
use crate::container::definition::ComponentDefinition;
use crate::container::error::ContainerError;
use crate::container::service::{MemoOptions, ServiceContainer};
use crate::event::Attachments;

#[derive(Debug)]
struct Logger {
    attachments: Attachments,
    level: String,
    initialized: bool,
    permissive: bool,
}

impl Logger {
    fn boxed() -> Box<dyn Component> {
        Box::new(Logger {
            attachments: Attachments::new(),
            level: "info".to_string(),
            initialized: false,
            permissive: false,
        })
    }
}

#[async_trait]
impl Component for Logger {
    fn type_name(&self) -> &str {
        "logger"
    }

    fn attachments(&self) -> &Attachments {
        &self.attachments
    }

    fn attachments_mut(&mut self) -> &mut Attachments {
        &mut self.attachments
    }

    fn set_property(&mut self, name: &str, value: Value) -> Result<(), ContainerError> {
        match name {
            "level" => {
                self.level = value.as_str().unwrap_or_default().to_string();
                Ok(())
            }
            _ => Err(ContainerError::UnknownProperty {
                class: self.type_name().to_string(),
                property: name.to_string(),
            }),
        }
    }

    fn permissive(&self) -> bool {
        self.permissive
    }

    async fn init(&mut self) -> Result<(), ContainerError> {
        self.initialized = true;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn new_container() -> ServiceContainer {
    let aliases = Arc::new(Mutex::new(AliasRegistry::with_roots([(
        "@app", "/srv/app",
    )])));
    let mut container = ServiceContainer::new(aliases);
    container.register_class_fn("logger", |_args| Ok(Logger::boxed()));
    container
}

#[tokio::test]
async fn test_get_memoizes_the_singleton() {
    let mut container = new_container();
    container.set_definition("log", ComponentDefinition::new("logger"));

    let first = container.get("log").await.unwrap();
    let second = container.get("log").await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(container.instance_count(), 1);
}

#[tokio::test]
async fn test_get_unknown_component_fails() {
    let mut container = new_container();
    let err = container.get("nothing").await.unwrap_err();
    assert!(matches!(err, ContainerError::ComponentNotFound { name } if name == "nothing"));
}

#[tokio::test]
async fn test_props_are_assigned_and_init_runs() {
    let mut container = new_container();
    container.set_definition(
        "log",
        ComponentDefinition::new("logger").prop("level", json!("debug")),
    );

    let instance = container.get("log").await.unwrap();
    let guard = instance.lock().await;
    let logger = guard.as_any().downcast_ref::<Logger>().unwrap();
    assert_eq!(logger.level, "debug");
    assert!(logger.initialized);
}

#[tokio::test]
async fn test_unknown_property_fails_construction() {
    let mut container = new_container();
    container.set_definition(
        "log",
        ComponentDefinition::new("logger").prop("volume", json!(11)),
    );

    let err = container.get("log").await.unwrap_err();
    assert!(matches!(err, ContainerError::UnknownProperty { property, .. } if property == "volume"));
    // The failed build is not memoized
    assert_eq!(container.instance_count(), 0);
}

#[tokio::test]
async fn test_permissive_component_tolerates_unknown_props() {
    let mut container = new_container();
    container.register_class_fn("tolerant", |_args| {
        Ok(Box::new(Logger {
            attachments: Attachments::new(),
            level: "info".to_string(),
            initialized: false,
            permissive: true,
        }) as Box<dyn Component>)
    });
    container.set_definition(
        "log",
        ComponentDefinition::new("tolerant")
            .prop("level", json!("warn"))
            .prop("volume", json!(11)),
    );

    let instance = container.get("log").await.unwrap();
    let guard = instance.lock().await;
    let logger = guard.as_any().downcast_ref::<Logger>().unwrap();
    // Declared props still land; the unknown one is ignored
    assert_eq!(logger.level, "warn");
}

#[tokio::test]
async fn test_unregistered_class_fails_resolution() {
    let mut container = new_container();
    container.set_definition("svc", ComponentDefinition::new("missingClass"));

    let err = container.get("svc").await.unwrap_err();
    assert!(matches!(err, ContainerError::ClassResolution { reference } if reference == "missingClass"));
}

#[tokio::test]
async fn test_class_names_resolve_through_the_alias_registry() {
    let aliases = Arc::new(Mutex::new(AliasRegistry::with_roots([("@vendor", "pkg")])));
    let mut container = ServiceContainer::new(aliases);
    container.register_class_fn("pkg/logger", |_args| Ok(Logger::boxed()));
    container.set_definition("log", ComponentDefinition::new("@vendor/logger"));

    assert!(container.get("log").await.is_ok());
}

#[tokio::test]
async fn test_factory_ref_bypasses_the_class_registry() {
    let mut container = new_container();
    let instance = container
        .create_object(
            ClassRef::Factory(Arc::new(|_container, _args| {
                Box::pin(async move { Ok(Logger::boxed()) })
            })),
            Value::Null,
            serde_json::Map::new(),
        )
        .await
        .unwrap();

    let guard = instance.lock().await;
    assert!(guard.as_any().downcast_ref::<Logger>().is_some());
}

#[tokio::test]
async fn test_factories_can_look_up_dependencies() {
    let mut container = new_container();
    container.register_class(
        "service",
        Arc::new(|container, _args| {
            Box::pin(async move {
                // A service depending on the logger pulls it from the
                // container during its own construction.
                let _log = container.get("log").await?;
                Ok(Logger::boxed())
            })
        }),
    );
    container.set_definition("log", ComponentDefinition::new("logger"));
    container.set_definition("svc", ComponentDefinition::new("service"));

    assert!(container.get("svc").await.is_ok());
    // Both the service and its dependency are memoized now
    assert_eq!(container.instance_count(), 2);
}

#[tokio::test]
async fn test_reentrant_construction_fails_fast() {
    let mut container = new_container();
    container.register_class(
        "aClass",
        Arc::new(|container, _args| {
            Box::pin(async move {
                let _b = container.get("b").await?;
                Ok(Logger::boxed())
            })
        }),
    );
    container.register_class(
        "bClass",
        Arc::new(|container, _args| {
            Box::pin(async move {
                let _a = container.get("a").await?;
                Ok(Logger::boxed())
            })
        }),
    );
    container.set_definition("a", ComponentDefinition::new("aClass"));
    container.set_definition("b", ComponentDefinition::new("bClass"));

    let err = container.get("a").await.unwrap_err();
    match err {
        ContainerError::CircularDependency { name, chain } => {
            assert_eq!(name, "a");
            assert_eq!(chain, "a -> b -> a");
        }
        other => panic!("expected CircularDependency, got {other:?}"),
    }
}

#[tokio::test]
async fn test_memo_sync_and_retrieve() {
    let mut container = new_container();
    container
        .memo_sync("request", json!({"id": 1}), MemoOptions::default())
        .unwrap();
    assert_eq!(container.retrieve("request"), Some(json!({"id": 1})));

    // Non-frozen entries may be overwritten
    container
        .memo_sync("request", json!({"id": 2}), MemoOptions::default())
        .unwrap();
    assert_eq!(container.retrieve("request"), Some(json!({"id": 2})));
}

#[tokio::test]
async fn test_frozen_entries_reject_overwrites() {
    let mut container = new_container();
    container
        .memo_sync("secret", json!("v1"), MemoOptions::frozen())
        .unwrap();

    let err = container
        .memo_sync("secret", json!("v2"), MemoOptions::default())
        .unwrap_err();
    assert!(matches!(err, ContainerError::FrozenEntry { key } if key == "secret"));
    assert_eq!(container.retrieve("secret"), Some(json!("v1")));
}

#[tokio::test]
async fn test_memo_sync_with_evaluates_only_when_absent() {
    let mut container = new_container();
    container
        .memo_sync_with("lazy", || json!("first"), MemoOptions::default())
        .unwrap();
    container
        .memo_sync_with("lazy", || json!("second"), MemoOptions::default())
        .unwrap();
    assert_eq!(container.retrieve("lazy"), Some(json!("first")));
}

#[tokio::test]
async fn test_flush_evicts_memo_and_instances() {
    let mut container = new_container();
    container.set_definition("log", ComponentDefinition::new("logger"));
    container
        .memo_sync("log", json!("shadow"), MemoOptions::default())
        .unwrap();

    let first = container.get("log").await.unwrap();
    container.flush("log");
    assert_eq!(container.retrieve("log"), None);

    let second = container.get("log").await.unwrap();
    assert!(!Arc::ptr_eq(&first, &second));

    // Flushing an absent key is silent
    container.flush("never-was");
}
