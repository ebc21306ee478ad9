use serde_json::json;

use crate::config::error::ConfigError;
use crate::config::schema::{FieldSchema, Rule, Schema, ValueType, camel_case};

fn plugin_like_schema() -> Schema {
    Schema::new("plugin")
        .field(
            "path",
            FieldSchema::new("plugin path")
                .required()
                .rule(Rule::of_type(ValueType::String))
                .rule(Rule::min_length(3)),
        )
        .field(
            "commands",
            FieldSchema::new("plugin commands flag")
                .rule(Rule::of_type(ValueType::Boolean))
                .default_value(json!(true)),
        )
}

fn validation_parts(err: ConfigError) -> (String, String) {
    match err {
        ConfigError::Validation { path, message } => (path, message),
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[test]
fn test_valid_value_passes() {
    let schema = plugin_like_schema();
    assert!(
        schema
            .validate("", &json!({"path": "@app/packages/cors", "commands": true}))
            .is_ok()
    );
}

#[test]
fn test_missing_required_field_reports_its_path_and_title() {
    let schema = plugin_like_schema();
    let err = schema.validate("", &json!({"commands": true})).unwrap_err();

    let (path, message) = validation_parts(err);
    assert_eq!(path, "path");
    assert_eq!(message, "plugin path is required");
}

#[test]
fn test_field_paths_are_prefixed_with_the_subtree_path() {
    let schema = plugin_like_schema();
    let err = schema
        .validate("plugins.cors", &json!({"commands": true}))
        .unwrap_err();

    let (path, _) = validation_parts(err);
    assert_eq!(path, "plugins.cors.path");
}

#[test]
fn test_first_violated_rule_renders_its_template() {
    let schema = plugin_like_schema();
    let err = schema.validate("", &json!({"path": "ab"})).unwrap_err();

    let (path, message) = validation_parts(err);
    assert_eq!(path, "path");
    assert_eq!(message, "plugin path must be at least 3 characters long");
}

#[test]
fn test_custom_message_template_substitutes_title_and_value() {
    let schema = Schema::new("settings").field(
        "name",
        FieldSchema::new("application name").rule(
            Rule::max_length(4).message("{title} exceeds the configured limit of {value}"),
        ),
    );
    let err = schema.validate("", &json!({"name": "toolong"})).unwrap_err();

    let (_, message) = validation_parts(err);
    assert_eq!(
        message,
        "application name exceeds the configured limit of 4"
    );
}

#[test]
fn test_type_rule_accepts_any_declared_kind() {
    let schema = Schema::new("components").entries(
        FieldSchema::new("component definition")
            .rule(Rule::any_of_types(vec![ValueType::String, ValueType::Object])),
    );

    assert!(schema.validate("", &json!({"log": "logger"})).is_ok());
    assert!(
        schema
            .validate("", &json!({"log": {"class": "logger"}}))
            .is_ok()
    );
    let err = schema.validate("", &json!({"log": 42})).unwrap_err();
    let (path, message) = validation_parts(err);
    assert_eq!(path, "log");
    assert_eq!(message, "component definition must be of type string or object");
}

#[test]
fn test_pattern_rule() {
    let schema = Schema::new("plugin").field(
        "alias",
        FieldSchema::new("plugin alias").rule(Rule::pattern(camel_case())),
    );

    assert!(schema.validate("", &json!({"alias": "corsTools"})).is_ok());
    assert!(schema.validate("", &json!({"alias": "Not-Camel"})).is_err());
}

#[test]
fn test_one_of_rule() {
    let schema = Schema::new("settings").field(
        "mode",
        FieldSchema::new("run mode").rule(Rule::one_of(vec![json!("dev"), json!("prod")])),
    );

    assert!(schema.validate("", &json!({"mode": "dev"})).is_ok());
    let err = schema.validate("", &json!({"mode": "staging"})).unwrap_err();
    let (_, message) = validation_parts(err);
    assert_eq!(message, "run mode must be one of \"dev\", \"prod\"");
}

#[test]
fn test_key_pattern_applies_to_undeclared_keys() {
    let schema = Schema::new("plugins").key_pattern(camel_case());

    assert!(schema.validate("", &json!({"cors": {}})).is_ok());
    let err = schema.validate("", &json!({"Bad-Id": {}})).unwrap_err();
    let (path, _) = validation_parts(err);
    assert_eq!(path, "Bad-Id");
}

#[test]
fn test_unknown_members_are_rejected_without_a_key_pattern() {
    let schema = plugin_like_schema();
    let err = schema
        .validate("", &json!({"path": "abc", "surprise": 1}))
        .unwrap_err();
    let (path, _) = validation_parts(err);
    assert_eq!(path, "surprise");

    let tolerant = plugin_like_schema().allow_unknown();
    assert!(
        tolerant
            .validate("", &json!({"path": "abc", "surprise": 1}))
            .is_ok()
    );
}

#[test]
fn test_non_object_subtree_is_rejected() {
    let schema = plugin_like_schema();
    let err = schema.validate("plugins.cors", &json!("nope")).unwrap_err();
    let (path, message) = validation_parts(err);
    assert_eq!(path, "plugins.cors");
    assert_eq!(message, "plugin must be of type object");
}

#[test]
fn test_apply_defaults_fills_missing_fields_only() {
    let schema = plugin_like_schema();

    let mut value = json!({"path": "@app/packages/cors"});
    schema.apply_defaults(&mut value);
    assert_eq!(value, json!({"path": "@app/packages/cors", "commands": true}));

    let mut explicit = json!({"path": "@app/packages/cors", "commands": false});
    schema.apply_defaults(&mut explicit);
    assert_eq!(explicit.get("commands"), Some(&json!(false)));
}

#[test]
fn test_nested_schema_validates_through_the_field() {
    let schema = Schema::new("plugin").field(
        "components",
        FieldSchema::new("plugin components")
            .rule(Rule::of_type(ValueType::Object))
            .nested(Schema::new("plugin components").key_pattern(camel_case()).entries(
                FieldSchema::new("component definition").rule(Rule::of_type(ValueType::Object)),
            )),
    );

    assert!(
        schema
            .validate("", &json!({"components": {"cors": {"class": "corsFilter"}}}))
            .is_ok()
    );
    let err = schema
        .validate("", &json!({"components": {"cors": "shorthand"}}))
        .unwrap_err();
    let (path, _) = validation_parts(err);
    assert_eq!(path, "components.cors");
}
