//! Materialization of template-backed fileset documents
//!
//! A document is materialized by expanding its path template, reading the
//! file it names from the fileset directory, expanding the templates inside
//! the file, parsing the result and deep-merging caller overrides over it.
//! Nothing is cached; every call goes back to disk.

use std::path::Path;

use serde_json::Value;

use fileset_fs::{ConfigFormat, NormalizedPath, io};

use crate::error::TemplateSite;
use crate::template::MissingKey;
use crate::vars::Environment;
use crate::{Error, Result};

/// Loads documents of one fileset against its resolved environment.
pub struct Materializer<'a> {
    dir: &'a NormalizedPath,
    env: &'a Environment,
    missing: MissingKey,
}

impl<'a> Materializer<'a> {
    /// `dir` is the fileset directory (`<modules root>/<module>/<fileset>`).
    pub fn new(dir: &'a NormalizedPath, env: &'a Environment) -> Self {
        Self {
            dir,
            env,
            missing: MissingKey::default(),
        }
    }

    pub fn missing_key(mut self, missing: MissingKey) -> Self {
        self.missing = missing;
        self
    }

    /// Expand a template taken from `site`.
    pub fn expand(&self, site: TemplateSite, source: &str) -> Result<String> {
        self.env
            .expand(source, self.missing)
            .map_err(|e| Error::template(site, source, e))
    }

    /// Expand the manifest path template stored under `key` and resolve it
    /// against the fileset directory.
    pub fn resolve_path(&self, key: &'static str, path_template: &str) -> Result<NormalizedPath> {
        let relative = self.expand(TemplateSite::ManifestPath(key), path_template)?;
        Ok(self.dir.join(&relative))
    }

    /// Materialize the document named by the `key` path template.
    ///
    /// `overrides` is merged over the parsed document; `null` or an empty
    /// mapping leaves it untouched.
    pub fn load(
        &self,
        key: &'static str,
        path_template: &str,
        format: ConfigFormat,
        overrides: &Value,
    ) -> Result<Value> {
        let path = self.resolve_path(key, path_template)?;
        let contents = io::read_text(&path).map_err(Error::from_file)?;
        let expanded = self.expand(TemplateSite::File(path.to_native()), &contents)?;
        let mut document: Value = format.parse(&expanded, &path).map_err(Error::from_file)?;

        merge_overrides(&mut document, overrides, &path.to_native())?;
        tracing::debug!(
            path = %path,
            document = %document,
            "Materialized {} document",
            format.name()
        );
        Ok(document)
    }
}

/// Deep-merge `overrides` into `document`.
///
/// Both must be mappings unless `overrides` is empty. `path` is only used
/// for error context.
pub fn merge_overrides(document: &mut Value, overrides: &Value, path: &Path) -> Result<()> {
    match overrides {
        Value::Null => return Ok(()),
        Value::Object(map) if map.is_empty() => return Ok(()),
        Value::Object(_) => {}
        other => {
            return Err(Error::OverrideMerge {
                path: path.to_path_buf(),
                reason: format!("overrides must be a mapping, got {other}"),
            });
        }
    }

    match document {
        Value::Object(_) => {}
        Value::Null => *document = Value::Object(serde_json::Map::new()),
        _ => {
            return Err(Error::OverrideMerge {
                path: path.to_path_buf(),
                reason: "document is not a mapping".to_string(),
            });
        }
    }

    deep_merge_value(document, overrides);
    Ok(())
}

/// Deep merge two JSON values
///
/// If both values are objects, merge them recursively with `other` taking precedence.
/// Otherwise, `other` replaces `base`.
fn deep_merge_value(base: &mut Value, other: &Value) {
    match (base, other) {
        (Value::Object(base_map), Value::Object(other_map)) => {
            for (key, other_val) in other_map {
                if let Some(base_val) = base_map.get_mut(key) {
                    deep_merge_value(base_val, other_val);
                } else {
                    base_map.insert(key.clone(), other_val.clone());
                }
            }
        }
        (base, other) => {
            *base = other.clone();
        }
    }
}
