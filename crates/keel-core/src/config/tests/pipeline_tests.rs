use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::config::pipeline::ValidationPipeline;
use crate::config::schema::{FieldSchema, Rule, Schema, ValueType};
use crate::config::tree::ConfigTree;
use crate::config::validator::{ConfigValidator, ValidatorState};
use crate::kernel::context::AppContext;
use crate::kernel::error::Result;

/// Normalizes the `dirs` setting from a single string into a list.
struct ExpandValidator;

#[async_trait]
impl ConfigValidator for ExpandValidator {
    fn name(&self) -> &'static str {
        "expand"
    }

    fn property_names(&self, _tree: &ConfigTree) -> Vec<String> {
        vec!["dirs".to_string()]
    }

    async fn apply(&self, _ctx: &mut AppContext, _path: &str, value: Value) -> Result<Value> {
        match value {
            Value::String(dir) => {
                let sub = format!("{}/sub", dir);
                Ok(json!([dir, sub]))
            }
            other => Ok(other),
        }
    }
}

/// Counts the entries of `dirs`, but only claims the subtree once it is in
/// the normalized list form.
struct ConsumeValidator {
    seen: Arc<AtomicU32>,
}

#[async_trait]
impl ConfigValidator for ConsumeValidator {
    fn name(&self) -> &'static str {
        "consume"
    }

    fn property_names(&self, tree: &ConfigTree) -> Vec<String> {
        match tree.get("dirs") {
            Some(Value::Array(_)) => vec!["dirs".to_string()],
            _ => Vec::new(),
        }
    }

    async fn apply(&self, _ctx: &mut AppContext, _path: &str, value: Value) -> Result<Value> {
        if let Value::Array(items) = &value {
            self.seen.fetch_add(items.len() as u32, Ordering::SeqCst);
        }
        Ok(value)
    }
}

/// Fails its schema check: `dirs` must be an object here.
struct StrictValidator;

#[async_trait]
impl ConfigValidator for StrictValidator {
    fn name(&self) -> &'static str {
        "strict"
    }

    fn property_names(&self, _tree: &ConfigTree) -> Vec<String> {
        vec!["settings".to_string()]
    }

    fn schema(&self) -> Option<Schema> {
        Some(
            Schema::new("settings").field(
                "limit",
                FieldSchema::new("limit")
                    .required()
                    .rule(Rule::of_type(ValueType::Integer)),
            ),
        )
    }

    async fn apply(&self, _ctx: &mut AppContext, _path: &str, value: Value) -> Result<Value> {
        Ok(value)
    }
}

fn tree_with_dirs() -> ConfigTree {
    ConfigTree::from_value(json!({"dirs": "/srv/app/commands"})).unwrap()
}

#[tokio::test]
async fn test_later_validator_sees_earlier_normalization() {
    let mut ctx = AppContext::new("/srv/app");
    let mut tree = tree_with_dirs();
    let seen = Arc::new(AtomicU32::new(0));

    let mut pipeline = ValidationPipeline::new();
    pipeline.add_validator(Box::new(ExpandValidator));
    pipeline.add_validator(Box::new(ConsumeValidator {
        seen: Arc::clone(&seen),
    }));

    pipeline.run(&mut ctx, &mut tree).await.unwrap();

    // The consumer observed the expanded two-entry list, not the raw string
    assert_eq!(seen.load(Ordering::SeqCst), 2);
    assert_eq!(
        tree.get("dirs"),
        Some(&json!(["/srv/app/commands", "/srv/app/commands/sub"]))
    );
}

#[tokio::test]
async fn test_swapped_order_makes_the_consumer_miss_its_subtree() {
    let mut ctx = AppContext::new("/srv/app");
    let mut tree = tree_with_dirs();
    let seen = Arc::new(AtomicU32::new(0));

    let mut pipeline = ValidationPipeline::new();
    pipeline.add_validator(Box::new(ConsumeValidator {
        seen: Arc::clone(&seen),
    }));
    pipeline.add_validator(Box::new(ExpandValidator));

    pipeline.run(&mut ctx, &mut tree).await.unwrap();

    // Running first, the consumer's dynamic selection found nothing
    assert_eq!(seen.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_states_are_reported_per_validator() {
    let mut ctx = AppContext::new("/srv/app");
    let mut tree = tree_with_dirs();

    let mut pipeline = ValidationPipeline::new();
    pipeline.add_validator(Box::new(ExpandValidator));

    assert_eq!(pipeline.state("expand"), None);
    pipeline.run(&mut ctx, &mut tree).await.unwrap();
    assert_eq!(pipeline.state("expand"), Some(ValidatorState::Done));
}

#[tokio::test]
async fn test_failure_aborts_and_leaves_earlier_effects_intact() {
    let mut ctx = AppContext::new("/srv/app");
    let mut tree =
        ConfigTree::from_value(json!({"dirs": "/srv/app/commands", "settings": {}})).unwrap();
    let seen = Arc::new(AtomicU32::new(0));

    let mut pipeline = ValidationPipeline::new();
    pipeline.add_validator(Box::new(ExpandValidator));
    pipeline.add_validator(Box::new(StrictValidator));
    pipeline.add_validator(Box::new(ConsumeValidator {
        seen: Arc::clone(&seen),
    }));

    let err = pipeline.run(&mut ctx, &mut tree).await.unwrap_err();
    assert!(err.to_string().contains("limit is required"));

    assert_eq!(pipeline.state("expand"), Some(ValidatorState::Done));
    assert_eq!(pipeline.state("strict"), Some(ValidatorState::Failed));
    // The validator after the failure never ran
    assert_eq!(pipeline.state("consume"), None);
    assert_eq!(seen.load(Ordering::SeqCst), 0);

    // No rollback: the first validator's normalization is still in place
    assert!(matches!(tree.get("dirs"), Some(Value::Array(_))));
}

#[tokio::test]
async fn test_missing_subtree_is_skipped() {
    let mut ctx = AppContext::new("/srv/app");
    let mut tree = ConfigTree::new();

    let mut pipeline = ValidationPipeline::new();
    pipeline.add_validator(Box::new(ExpandValidator));

    pipeline.run(&mut ctx, &mut tree).await.unwrap();
    assert_eq!(pipeline.state("expand"), Some(ValidatorState::Done));
    assert!(tree.is_empty());
}
