//! Variable environments and their resolution
//!
//! A fileset's variables are resolved once, in manifest order, into an
//! [`Environment`]. The environment is then the data every path and config
//! template of the fileset is rendered against.

mod resolver;
mod value;

pub use resolver::Resolver;
pub use value::VarValue;

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::template::{self, MissingKey};

/// Reserved entry holding the host facts (`hostname`, `domain`).
pub const BUILTIN_KEY: &str = "builtin";

/// Reserved entry holding runtime facts added after resolution.
pub const BEAT_KEY: &str = "beat";

/// Key of the pipeline identifier inside [`BEAT_KEY`].
pub const PIPELINE_ID_KEY: &str = "pipeline_id";

/// Resolved variables, keyed by name.
///
/// Entries are only ever added or replaced, never removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Environment {
    vars: BTreeMap<String, VarValue>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&VarValue> {
        self.vars.get(name)
    }

    /// Bind `name`, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: VarValue) {
        self.vars.insert(name.into(), value);
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// The environment as template data: a mapping from name to value.
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.vars
                .iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect(),
        )
    }

    /// Render `source` against this environment.
    pub fn expand(&self, source: &str, missing: MissingKey) -> template::Result<String> {
        template::render(source, &self.to_value(), missing)
    }
}
