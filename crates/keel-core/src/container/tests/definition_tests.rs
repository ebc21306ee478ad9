use serde_json::json;

use crate::container::definition::ComponentDefinition;
use crate::container::error::ContainerError;

#[test]
fn test_string_shorthand_is_class_only() {
    let definition = ComponentDefinition::from_value(&json!("logger")).unwrap();
    assert_eq!(definition.class, "logger");
    assert!(definition.props.is_empty());
    assert!(definition.args.is_null());
}

#[test]
fn test_object_form_splits_class_and_props() {
    let definition = ComponentDefinition::from_value(&json!({
        "class": "logger",
        "level": "debug",
        "buffered": true,
    }))
    .unwrap();

    assert_eq!(definition.class, "logger");
    assert_eq!(definition.props.get("level"), Some(&json!("debug")));
    assert_eq!(definition.props.get("buffered"), Some(&json!(true)));
    assert!(!definition.props.contains_key("class"));
}

#[test]
fn test_missing_class_is_rejected() {
    let err = ComponentDefinition::from_value(&json!({"level": "debug"})).unwrap_err();
    assert!(matches!(err, ContainerError::InvalidDefinition { .. }));
}

#[test]
fn test_non_string_non_object_is_rejected() {
    let err = ComponentDefinition::from_value(&json!(42)).unwrap_err();
    assert!(matches!(err, ContainerError::InvalidDefinition { .. }));
}

#[test]
fn test_to_value_round_trips_the_normalized_form() {
    let definition = ComponentDefinition::new("cache").prop("size", json!(128));
    assert_eq!(
        definition.to_value(),
        json!({"class": "cache", "size": 128})
    );
}
