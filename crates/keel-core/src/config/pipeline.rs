use std::collections::HashMap;

use crate::config::tree::ConfigTree;
use crate::config::validator::{ConfigValidator, ValidatorState};
use crate::config::validators::{
    BehaviorsValidator, ComponentsValidator, EventsValidator, ModulesValidator,
    PluginsValidator, SearchPathsValidator, SettingsValidator,
};
use crate::kernel::context::AppContext;
use crate::kernel::error::{Error, Result};

/// Sequential configuration validation driver.
///
/// Validators run strictly in declared order. For each one: extract the
/// owned subtree(s), check them against the schema, run `before_process`,
/// run `apply` per subtree and write the normalized value back. The tree is
/// threaded by reference, so later validators observe earlier validators'
/// output. A failure aborts the remainder of the pipeline and leaves
/// previously applied effects intact; there is no rollback.
pub struct ValidationPipeline {
    validators: Vec<Box<dyn ConfigValidator>>,
    states: HashMap<String, ValidatorState>,
}

impl ValidationPipeline {
    /// Create an empty pipeline
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
            states: HashMap::new(),
        }
    }

    /// Create a pipeline with the built-in validators in their declared
    /// order: settings naming, modules, components, search paths, plugins,
    /// events, behaviors.
    pub fn with_core_validators() -> Self {
        let mut pipeline = Self::new();
        pipeline.add_validator(Box::new(SettingsValidator));
        pipeline.add_validator(Box::new(ModulesValidator));
        pipeline.add_validator(Box::new(ComponentsValidator));
        pipeline.add_validator(Box::new(SearchPathsValidator));
        pipeline.add_validator(Box::new(PluginsValidator));
        pipeline.add_validator(Box::new(EventsValidator));
        pipeline.add_validator(Box::new(BehaviorsValidator));
        pipeline
    }

    /// Append a validator to the declared order.
    pub fn add_validator(&mut self, validator: Box<dyn ConfigValidator>) {
        self.validators.push(validator);
    }

    /// Names of the registered validators, in declared order.
    pub fn validator_names(&self) -> Vec<&'static str> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    /// State a validator reached during the last run.
    pub fn state(&self, name: &str) -> Option<ValidatorState> {
        self.states.get(name).copied()
    }

    /// Run every validator in declared order against the tree.
    pub async fn run(&mut self, ctx: &mut AppContext, tree: &mut ConfigTree) -> Result<()> {
        for index in 0..self.validators.len() {
            let name = self.validators[index].name();
            log::debug!("Running config validator '{}'", name);
            self.states.insert(name.to_string(), ValidatorState::Pending);

            let (state, error) = Self::drive(self.validators[index].as_ref(), ctx, tree).await;
            self.states.insert(name.to_string(), state);

            if let Some(error) = error {
                log::error!("Config validator '{}' failed: {}", name, error);
                return Err(error);
            }
        }
        Ok(())
    }

    /// Drive one validator through `Pending → SchemaChecked →
    /// BeforeProcessed → Applied → Done`. A failure at any step lands in
    /// the absorbing `Failed` state with the error that caused it.
    async fn drive(
        validator: &dyn ConfigValidator,
        ctx: &mut AppContext,
        tree: &mut ConfigTree,
    ) -> (ValidatorState, Option<Error>) {
        let paths = validator.property_names(tree);

        if let Some(schema) = validator.schema() {
            for path in &paths {
                if let Some(value) = tree.get(path) {
                    if let Err(e) = schema.validate(path, value) {
                        return (ValidatorState::Failed, Some(e.into()));
                    }
                }
            }
        }

        if let Err(e) = validator.before_process(ctx, tree).await {
            return (ValidatorState::Failed, Some(e));
        }

        for path in &paths {
            let Some(value) = tree.get(path).cloned() else {
                continue;
            };
            match validator.apply(ctx, path, value).await {
                Ok(normalized) => tree.set(path, normalized),
                Err(e) => return (ValidatorState::Failed, Some(e)),
            }
        }

        (ValidatorState::Done, None)
    }
}

impl Default for ValidationPipeline {
    fn default() -> Self {
        Self::new()
    }
}
