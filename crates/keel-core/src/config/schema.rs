//! Declarative schemas for configuration subtrees.
//!
//! A [`Schema`] describes the legal shape of one subtree: named fields with
//! ordered rule lists, optional key patterns for map-shaped subtrees, and
//! declared defaults. Validation reports the first violated rule as a
//! [`ConfigError::Validation`] carrying the machine-readable field path and
//! a message rendered from the rule's template. Templates support two
//! substitution markers: [`TITLE_MARK`] for the failing field's declared
//! title and [`VALUE_MARK`] for the violated rule's configured value.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::config::error::ConfigError;

/// Substitution marker replaced with the failing field's declared title.
pub const TITLE_MARK: &str = "{title}";

/// Substitution marker replaced with the violated rule's configured value.
pub const VALUE_MARK: &str = "{value}";

/// Lower-camel-case pattern required of configuration keys and ids.
pub const CAMEL_CASE_PATTERN: &str = "^[a-z][a-zA-Z0-9]*$";

/// Shared compiled form of [`CAMEL_CASE_PATTERN`].
pub fn camel_case() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(CAMEL_CASE_PATTERN).expect("camel case pattern compiles"))
}

/// JSON value kinds a type rule can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Object,
    Array,
    String,
    Number,
    Integer,
    Boolean,
}

impl ValueType {
    fn matches(&self, value: &Value) -> bool {
        match self {
            ValueType::Object => value.is_object(),
            ValueType::Array => value.is_array(),
            ValueType::String => value.is_string(),
            ValueType::Number => value.is_number(),
            ValueType::Integer => value.is_i64() || value.is_u64(),
            ValueType::Boolean => value.is_boolean(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ValueType::Object => "object",
            ValueType::Array => "array",
            ValueType::String => "string",
            ValueType::Number => "number",
            ValueType::Integer => "integer",
            ValueType::Boolean => "boolean",
        }
    }
}

#[derive(Debug, Clone)]
enum RuleKind {
    Type(Vec<ValueType>),
    MinLength(usize),
    MaxLength(usize),
    Pattern(Regex),
    OneOf(Vec<Value>),
}

/// One constraint on a field value, with an optional message template.
#[derive(Debug, Clone)]
pub struct Rule {
    kind: RuleKind,
    message: Option<String>,
}

impl Rule {
    pub fn of_type(value_type: ValueType) -> Self {
        Self::any_of_types(vec![value_type])
    }

    pub fn any_of_types(types: Vec<ValueType>) -> Self {
        Self {
            kind: RuleKind::Type(types),
            message: None,
        }
    }

    /// Minimum length, in characters for strings and elements for arrays.
    pub fn min_length(len: usize) -> Self {
        Self {
            kind: RuleKind::MinLength(len),
            message: None,
        }
    }

    /// Maximum length, in characters for strings and elements for arrays.
    pub fn max_length(len: usize) -> Self {
        Self {
            kind: RuleKind::MaxLength(len),
            message: None,
        }
    }

    pub fn pattern(pattern: &Regex) -> Self {
        Self {
            kind: RuleKind::Pattern(pattern.clone()),
            message: None,
        }
    }

    pub fn one_of(allowed: Vec<Value>) -> Self {
        Self {
            kind: RuleKind::OneOf(allowed),
            message: None,
        }
    }

    /// Override the message template for this rule.
    pub fn message(mut self, template: &str) -> Self {
        self.message = Some(template.to_string());
        self
    }

    fn holds(&self, value: &Value) -> bool {
        match &self.kind {
            RuleKind::Type(types) => types.iter().any(|t| t.matches(value)),
            RuleKind::MinLength(len) => measured_length(value).is_none_or(|l| l >= *len),
            RuleKind::MaxLength(len) => measured_length(value).is_none_or(|l| l <= *len),
            RuleKind::Pattern(re) => value.as_str().is_some_and(|s| re.is_match(s)),
            RuleKind::OneOf(allowed) => allowed.contains(value),
        }
    }

    fn configured_value(&self) -> String {
        match &self.kind {
            RuleKind::Type(types) => types
                .iter()
                .map(|t| t.name())
                .collect::<Vec<_>>()
                .join(" or "),
            RuleKind::MinLength(len) | RuleKind::MaxLength(len) => len.to_string(),
            RuleKind::Pattern(re) => re.as_str().to_string(),
            RuleKind::OneOf(allowed) => allowed
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    fn template(&self) -> &str {
        if let Some(custom) = &self.message {
            return custom;
        }
        match &self.kind {
            RuleKind::Type(_) => "{title} must be of type {value}",
            RuleKind::MinLength(_) => "{title} must be at least {value} characters long",
            RuleKind::MaxLength(_) => "{title} must be at most {value} characters long",
            RuleKind::Pattern(_) => "{title} must match the pattern {value}",
            RuleKind::OneOf(_) => "{title} must be one of {value}",
        }
    }

    fn render(&self, title: &str) -> String {
        self.template()
            .replace(TITLE_MARK, title)
            .replace(VALUE_MARK, &self.configured_value())
    }
}

fn measured_length(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

const REQUIRED_TEMPLATE: &str = "{title} is required";

/// Shape description for one field of a subtree.
#[derive(Debug, Clone, Default)]
pub struct FieldSchema {
    title: String,
    required: bool,
    rules: Vec<Rule>,
    default: Option<Value>,
    nested: Option<Box<Schema>>,
}

impl FieldSchema {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Default value filled in by [`Schema::apply_defaults`] when absent.
    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Nested object schema applied to the field's value.
    pub fn nested(mut self, schema: Schema) -> Self {
        self.nested = Some(Box::new(schema));
        self
    }

    fn check(&self, path: &str, value: &Value) -> Result<(), ConfigError> {
        for rule in &self.rules {
            if !rule.holds(value) {
                return Err(ConfigError::Validation {
                    path: path.to_string(),
                    message: rule.render(&self.title),
                });
            }
        }
        if let Some(nested) = &self.nested {
            nested.validate(path, value)?;
        }
        Ok(())
    }
}

/// Legal shape of one configuration subtree.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    title: String,
    fields: BTreeMap<String, FieldSchema>,
    key_pattern: Option<Regex>,
    entry_schema: Option<Box<FieldSchema>>,
    allow_unknown: bool,
}

impl Schema {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }

    /// Declare a named field.
    pub fn field(mut self, name: &str, field: FieldSchema) -> Self {
        self.fields.insert(name.to_string(), field);
        self
    }

    /// For map-shaped subtrees: undeclared keys must match this pattern.
    pub fn key_pattern(mut self, pattern: &Regex) -> Self {
        self.key_pattern = Some(pattern.clone());
        self
    }

    /// For map-shaped subtrees: schema applied to every undeclared member.
    pub fn entries(mut self, entry: FieldSchema) -> Self {
        self.entry_schema = Some(Box::new(entry));
        self
    }

    /// Tolerate undeclared members without a key pattern or entry schema.
    pub fn allow_unknown(mut self) -> Self {
        self.allow_unknown = true;
        self
    }

    /// Validate a subtree, reporting the first violation.
    ///
    /// `path` is the field-path prefix used in error reports; pass the
    /// subtree's property path, or an empty string when validating a value
    /// directly.
    pub fn validate(&self, path: &str, value: &Value) -> Result<(), ConfigError> {
        let Some(map) = value.as_object() else {
            return Err(ConfigError::Validation {
                path: path.to_string(),
                message: format!("{} must be of type object", self.title),
            });
        };

        for (name, field) in &self.fields {
            match map.get(name) {
                Some(member) => field.check(&join_path(path, name), member)?,
                None if field.required => {
                    return Err(ConfigError::Validation {
                        path: join_path(path, name),
                        message: REQUIRED_TEMPLATE.replace(TITLE_MARK, &field.title),
                    });
                }
                None => {}
            }
        }

        for (key, member) in map {
            if self.fields.contains_key(key) {
                continue;
            }
            if let Some(pattern) = &self.key_pattern {
                if !pattern.is_match(key) {
                    return Err(ConfigError::Validation {
                        path: join_path(path, key),
                        message: format!(
                            "{} keys must match the pattern {}",
                            self.title,
                            pattern.as_str()
                        ),
                    });
                }
            }
            if let Some(entry) = &self.entry_schema {
                entry.check(&join_path(path, key), member)?;
            } else if !self.allow_unknown && self.key_pattern.is_none() {
                return Err(ConfigError::Validation {
                    path: join_path(path, key),
                    message: format!("unexpected member '{}' in {}", key, self.title),
                });
            }
        }

        Ok(())
    }

    /// Fill declared defaults into missing fields, recursively.
    pub fn apply_defaults(&self, value: &mut Value) {
        let Some(map) = value.as_object_mut() else {
            return;
        };
        for (name, field) in &self.fields {
            if !map.contains_key(name) {
                if let Some(default) = &field.default {
                    map.insert(name.clone(), default.clone());
                }
            }
            if let Some(nested) = &field.nested {
                if let Some(member) = map.get_mut(name) {
                    nested.apply_defaults(member);
                }
            }
        }
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}
