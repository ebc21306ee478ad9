use async_trait::async_trait;
use serde_json::Value;

use crate::config::error::ConfigError;
use crate::config::tree::ConfigTree;
use crate::config::validator::ConfigValidator;
use crate::kernel::constants::SEARCH_PATHS_KEY;
use crate::kernel::context::AppContext;
use crate::kernel::error::Result;

/// Normalizes the directory-shaped `searchPaths` setting.
///
/// Accepts a single path, a `{ "path": ..., "recursive": ... }` descriptor,
/// or a list of either, and expands it into a de-duplicated flat list of
/// alias-resolved directories. Recursive descriptors enumerate the
/// subdirectories that exist on disk; a missing directory contributes only
/// its own resolved path.
pub struct SearchPathsValidator;

#[async_trait]
impl ConfigValidator for SearchPathsValidator {
    fn name(&self) -> &'static str {
        "searchPaths"
    }

    fn property_names(&self, _tree: &ConfigTree) -> Vec<String> {
        vec![SEARCH_PATHS_KEY.to_string()]
    }

    async fn apply(&self, ctx: &mut AppContext, path: &str, value: Value) -> Result<Value> {
        let descriptors: Vec<&Value> = match &value {
            Value::Array(items) => items.iter().collect(),
            single => vec![single],
        };

        let mut resolved = Vec::new();
        for descriptor in descriptors {
            let (dir, recursive) = parse_descriptor(path, descriptor)?;
            let dir = ctx.resolve_alias(&dir, true).await?;
            resolved.push(dir.clone());
            if recursive {
                collect_subdirectories(&dir, &mut resolved).await;
            }
        }

        let mut seen = std::collections::HashSet::new();
        resolved.retain(|dir| seen.insert(dir.clone()));

        Ok(Value::Array(resolved.into_iter().map(Value::String).collect()))
    }
}

fn parse_descriptor(path: &str, descriptor: &Value) -> Result<(String, bool)> {
    match descriptor {
        Value::String(dir) => Ok((dir.clone(), false)),
        Value::Object(map) => {
            let dir = map.get("path").and_then(Value::as_str).ok_or_else(|| {
                ConfigError::UnknownDeclaration {
                    key: path.to_string(),
                    details: "path descriptor requires a string member 'path'".to_string(),
                }
            })?;
            let recursive = map
                .get("recursive")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            Ok((dir.to_string(), recursive))
        }
        _ => Err(ConfigError::UnknownDeclaration {
            key: path.to_string(),
            details: "expected a path string or a {path, recursive} descriptor".to_string(),
        }
        .into()),
    }
}

/// Walk `root` on disk, appending every nested subdirectory. Unreadable
/// directories are skipped; resolution itself stays syntactic.
async fn collect_subdirectories(root: &str, out: &mut Vec<String>) {
    let mut pending = vec![root.to_string()];
    while let Some(dir) = pending.pop() {
        let Ok(mut entries) = tokio::fs::read_dir(&dir).await else {
            continue;
        };
        while let Ok(Some(entry)) = entries.next_entry().await {
            let is_dir = entry
                .file_type()
                .await
                .map(|file_type| file_type.is_dir())
                .unwrap_or(false);
            if is_dir {
                let subdir = entry.path().to_string_lossy().into_owned();
                out.push(subdir.clone());
                pending.push(subdir);
            }
        }
    }
}
