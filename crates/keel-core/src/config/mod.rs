//! # Keel Core Configuration System
//!
//! The configuration validation pipeline: a nested [`ConfigTree`] is run
//! through an ordered list of [`ConfigValidator`]s, each of which extracts
//! its subtree, checks it against a declarative [`Schema`], normalizes it,
//! and may side-effect the application (register component definitions,
//! install plugins, attach event handlers and behaviors). Later validators
//! observe earlier validators' normalized output.

pub mod error;
pub mod pipeline;
pub mod schema;
pub mod tree;
pub mod validator;
pub mod validators;

pub use error::ConfigError;
pub use pipeline::ValidationPipeline;
pub use schema::{FieldSchema, Rule, Schema, TITLE_MARK, VALUE_MARK, ValueType, camel_case};
pub use tree::{ConfigFormat, ConfigTree};
pub use validator::{ConfigValidator, ValidatorState};

// Test module declaration
#[cfg(test)]
mod tests;
