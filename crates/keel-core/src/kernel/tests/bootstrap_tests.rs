use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::config::tree::ConfigTree;
use crate::container::component::Component;
use crate::container::error::ContainerError;
use crate::event::Attachments;
use crate::event::emitter::sync_handler;
use crate::kernel::bootstrap::Application;
use crate::kernel::error::Error;

#[derive(Debug)]
struct Logger {
    attachments: Attachments,
    level: String,
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

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn boxed_logger() -> Box<dyn Component> {
    Box::new(Logger {
        attachments: Attachments::new(),
        level: "info".to_string(),
    })
}

async fn app_with_config(config: Value) -> Application {
    let tree = ConfigTree::from_value(config).unwrap();
    let app = Application::new("/srv/app", tree);
    app.register_class_fn("logger", |_args| Ok(boxed_logger())).await;
    app
}

#[tokio::test]
async fn test_alias_registration_and_resolution() {
    let app = app_with_config(json!({})).await;

    // Root alias registered at construction
    assert_eq!(
        app.resolve_alias("@app/commands", true).await.unwrap(),
        "/srv/app/commands"
    );

    app.set_alias("@data", "@app/data").await.unwrap();
    assert_eq!(
        app.resolve_alias("@data/cache", true).await.unwrap(),
        "/srv/app/data/cache"
    );

    // Root aliases stay immutable through the application surface
    assert!(app.set_alias("@app", "/elsewhere").await.is_err());
}

#[tokio::test]
async fn test_bootstrap_builds_components_lazily() {
    let mut app = app_with_config(json!({
        "components": {"log": {"class": "logger", "level": "debug"}}
    }))
    .await;

    app.bootstrap().await.unwrap();

    let first = app.component("log").await.unwrap();
    let second = app.component("log").await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let guard = first.lock().await;
    let logger = guard.as_any().downcast_ref::<Logger>().unwrap();
    assert_eq!(logger.level, "debug");
}

#[tokio::test]
async fn test_configuration_declared_events_fire_on_the_application() {
    let mut app = app_with_config(json!({
        "events": {"userCreated": "auditUser"}
    }))
    .await;

    let calls = Arc::new(AtomicU32::new(0));
    let calls_clone = Arc::clone(&calls);
    app.register_handler(
        "auditUser",
        sync_handler(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }),
    );

    app.bootstrap().await.unwrap();

    app.trigger("userCreated", None).await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_bootstrap_runs_exactly_once() {
    let mut app = app_with_config(json!({})).await;

    app.bootstrap().await.unwrap();
    assert!(app.is_initialized());

    let err = app.bootstrap().await.unwrap_err();
    assert!(matches!(err, Error::Lifecycle { .. }));
}

#[tokio::test]
async fn test_bootstrap_failure_is_fatal_and_reported() {
    let mut app = app_with_config(json!({
        "plugins": {"cors": {"commands": true}}
    }))
    .await;

    let err = app.bootstrap().await.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("plugins.cors.path"));
    assert!(!app.is_initialized());
}

#[tokio::test]
async fn test_shutdown_flushes_instances() {
    let mut app = app_with_config(json!({
        "components": {"log": "logger"}
    }))
    .await;

    app.bootstrap().await.unwrap();
    let before = app.component("log").await.unwrap();

    app.shutdown().await.unwrap();
    assert!(!app.is_initialized());

    // Definitions survive teardown; instances do not
    let after = app.component("log").await.unwrap();
    assert!(!Arc::ptr_eq(&before, &after));
}

#[tokio::test]
async fn test_shutdown_without_bootstrap_is_a_lifecycle_error() {
    let mut app = app_with_config(json!({})).await;
    assert!(matches!(
        app.shutdown().await.unwrap_err(),
        Error::Lifecycle { .. }
    ));
}

#[tokio::test]
async fn test_plugin_components_are_materialized_through_bootstrap() {
    let mut app = app_with_config(json!({
        "plugins": {
            "cors": {
                "path": "@app/packages/cors",
                "alias": "cors",
                "components": {"corsLog": {"class": "logger"}}
            }
        }
    }))
    .await;

    app.bootstrap().await.unwrap();

    assert!(app.component("corsLog").await.is_ok());
    assert_eq!(
        app.resolve_alias("@cors/index.js", true).await.unwrap(),
        "/srv/app/packages/cors/index.js"
    );
}
