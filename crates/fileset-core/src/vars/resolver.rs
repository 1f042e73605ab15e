//! Sequential resolution of declared variables
//!
//! Declarations are resolved strictly in manifest order. Each one may refer
//! to the builtins and to any variable declared before it; there is no
//! dependency analysis, so a reference to a later declaration fails like any
//! other missing key. Caller overrides are applied afterwards, verbatim.

use std::collections::BTreeMap;

use serde_json::Value;

use super::{BUILTIN_KEY, Environment, VarValue};
use crate::error::{TemplateSite, VarField};
use crate::host::{BuiltinVars, HostFacts};
use crate::manifest::VarDeclaration;
use crate::template::{self, MissingKey};
use crate::{Error, Result};

/// Resolves manifest variable declarations into an [`Environment`].
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use fileset_core::host::StaticHost;
/// use fileset_core::manifest::VarDeclaration;
/// use fileset_core::vars::{Resolver, VarValue};
/// use serde_json::json;
///
/// let declarations = vec![
///     VarDeclaration::new("dir", json!("/var/log")).with_os("windows", json!("C:/logs")),
///     VarDeclaration::new("paths", json!(["{{.dir}}/{{.builtin.hostname}}.log"])),
/// ];
///
/// let host = StaticHost::new("web01.example.com");
/// let env = Resolver::new(&host, "linux")
///     .resolve(&declarations, &BTreeMap::new())
///     .unwrap();
///
/// assert_eq!(
///     env.get("paths"),
///     Some(&VarValue::Sequence(vec![json!("/var/log/web01.log")]))
/// );
/// ```
pub struct Resolver<'h> {
    host: &'h dyn HostFacts,
    os: String,
    missing: MissingKey,
}

impl<'h> Resolver<'h> {
    /// Resolve on behalf of `os`, reading host facts from `host`.
    pub fn new(host: &'h dyn HostFacts, os: impl Into<String>) -> Self {
        Self {
            host,
            os: os.into(),
            missing: MissingKey::default(),
        }
    }

    /// Choose how references to undeclared variables are treated.
    pub fn missing_key(mut self, missing: MissingKey) -> Self {
        self.missing = missing;
        self
    }

    /// Resolve `declarations` in order, then apply `overrides`.
    ///
    /// Any failure aborts the whole resolution; no partially resolved
    /// environment is returned.
    pub fn resolve(
        &self,
        declarations: &[VarDeclaration],
        overrides: &BTreeMap<String, Value>,
    ) -> Result<Environment> {
        let mut env = Environment::new();
        let builtin = BuiltinVars::from_host(self.host)?;
        env.insert(BUILTIN_KEY, VarValue::Opaque(builtin.to_value()));

        for (index, declaration) in declarations.iter().enumerate() {
            let name = declaration.name().ok_or(Error::MissingVariableField {
                index,
                name: None,
                field: VarField::Name,
            })?;
            let default = declaration
                .default
                .as_ref()
                .ok_or_else(|| Error::MissingVariableField {
                    index,
                    name: Some(name.to_string()),
                    field: VarField::Default,
                })?;

            let value = match declaration.os_value(&self.os) {
                Some(os_value) => {
                    tracing::debug!(variable = name, os = %self.os, "Using OS-specific value");
                    os_value
                }
                None => default,
            };

            let resolved = self.resolve_value(&env, name, value)?;
            tracing::trace!(variable = name, value = ?resolved, "Resolved variable");
            env.insert(name, resolved);
        }

        for (name, value) in overrides {
            tracing::debug!(variable = %name, "Applying variable override");
            env.insert(name.clone(), VarValue::from(value.clone()));
        }

        Ok(env)
    }

    fn resolve_value(&self, env: &Environment, name: &str, value: &Value) -> Result<VarValue> {
        match value {
            Value::String(source) => {
                let expanded =
                    self.apply(env, source, || TemplateSite::Variable(name.to_string()))?;
                Ok(VarValue::String(expanded))
            }
            Value::Array(items) => {
                let mut transformed = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    match item {
                        Value::String(source) => {
                            let expanded = self.apply(env, source, || {
                                TemplateSite::SequenceElement {
                                    variable: name.to_string(),
                                    index,
                                }
                            })?;
                            transformed.push(Value::String(expanded));
                        }
                        other => transformed.push(other.clone()),
                    }
                }
                Ok(VarValue::Sequence(transformed))
            }
            other => Ok(VarValue::Opaque(other.clone())),
        }
    }

    fn apply(
        &self,
        env: &Environment,
        source: &str,
        site: impl FnOnce() -> TemplateSite,
    ) -> Result<String> {
        template::render(source, &env.to_value(), self.missing)
            .map_err(|e| Error::template(site(), source, e))
    }
}
