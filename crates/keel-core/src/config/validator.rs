use async_trait::async_trait;
use serde_json::Value;

use crate::config::schema::Schema;
use crate::config::tree::ConfigTree;
use crate::kernel::context::AppContext;
use crate::kernel::error::Result;

/// Progress of one validator through the pipeline.
///
/// `Failed` is absorbing: a failure at any step leaves the validator there
/// and aborts the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatorState {
    Pending,
    SchemaChecked,
    BeforeProcessed,
    Applied,
    Done,
    Failed,
}

/// One slice of the configuration tree: which subtree(s) it owns, the
/// schema they must satisfy, and the hooks that normalize them and
/// side-effect the application.
///
/// The pipeline driver is the only caller.
#[async_trait]
pub trait ConfigValidator: Send + Sync {
    /// Identifier used for pipeline state reporting.
    fn name(&self) -> &'static str;

    /// Property paths this validator owns. Evaluated against the *current*
    /// tree on every run, so the list may be computed from keys earlier
    /// validators materialized.
    fn property_names(&self, tree: &ConfigTree) -> Vec<String>;

    /// Schema the extracted subtree(s) must satisfy before any side effect
    /// runs, or `None` to skip shape validation.
    fn schema(&self) -> Option<Schema> {
        None
    }

    /// Side effects that must happen before normalization, e.g. registering
    /// child modules so later validators can reference them.
    async fn before_process(&self, ctx: &mut AppContext, tree: &mut ConfigTree) -> Result<()> {
        let _ = (ctx, tree);
        Ok(())
    }

    /// Normalize the subtree at `path`. The returned value is written back
    /// into the tree at the same path.
    async fn apply(&self, ctx: &mut AppContext, path: &str, value: Value) -> Result<Value>;
}
