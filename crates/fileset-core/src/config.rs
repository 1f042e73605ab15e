//! Caller-side module and fileset selection config

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Selects a module and carries per-fileset settings.
///
/// ```yaml
/// module: nginx
/// filesets:
///   access:
///     var:
///       paths: ["/srv/logs/access.log"]
///     prospector:
///       close_eof: true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ModuleConfig {
    /// Module directory name under the modules root
    pub module: String,

    #[serde(default)]
    pub filesets: BTreeMap<String, FilesetConfig>,
}

impl ModuleConfig {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            filesets: BTreeMap::new(),
        }
    }

    pub fn with_fileset(mut self, name: impl Into<String>, config: FilesetConfig) -> Self {
        self.filesets.insert(name.into(), config);
        self
    }

    /// Settings for `name`, or empty settings when none were given.
    pub fn fileset(&self, name: &str) -> FilesetConfig {
        self.filesets.get(name).cloned().unwrap_or_default()
    }
}

/// Caller overrides for a single fileset.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FilesetConfig {
    /// Variable overrides, applied verbatim after manifest resolution
    #[serde(default)]
    pub var: BTreeMap<String, Value>,

    /// Document deep-merged over the materialized harvesting config
    #[serde(default)]
    pub prospector: Value,
}

impl FilesetConfig {
    pub fn with_var(mut self, name: impl Into<String>, value: Value) -> Self {
        self.var.insert(name.into(), value);
        self
    }

    pub fn with_prospector(mut self, overrides: Value) -> Self {
        self.prospector = overrides;
        self
    }
}
