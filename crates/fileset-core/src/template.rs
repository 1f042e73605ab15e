//! Template expansion for manifest variables, paths and config files
//!
//! Fileset manifests and their config templates are written in the Go
//! `text/template` dialect (`{{.builtin.hostname}}`, `{{range .paths}}`,
//! `{{if eq .x "a"}}`). They are rendered with `gtmpl`, a Rust port of that
//! engine, so the built-in functions (`eq`, `index`, `len`, `printf`, ...)
//! behave as they do upstream.
//!
//! # Missing keys
//!
//! A reference to an absent key evaluates to "no value": it is false in
//! `if` and prints as `<no value>`. [`MissingKey::Error`], the default,
//! rejects any output that printed such a value, so a misspelled or
//! forward-referenced variable cannot silently end up in a path.
//! [`MissingKey::Empty`] renders it as empty text instead.
//!
//! # Example
//!
//! ```
//! use fileset_core::template::{self, MissingKey};
//! use serde_json::json;
//!
//! let data = json!({"builtin": {"hostname": "web01"}, "paths": ["/a.log", "/b.log"]});
//!
//! let out = template::render("{{.builtin.hostname}}:{{range .paths}} {{.}}{{end}}", &data, MissingKey::Error);
//! assert_eq!(out.unwrap(), "web01: /a.log /b.log");
//!
//! assert!(template::render("[{{.nope}}]", &data, MissingKey::Error).is_err());
//! assert_eq!(template::render("[{{.nope}}]", &data, MissingKey::Empty).unwrap(), "[]");
//! ```

use gtmpl::{Context, Template};
use serde_json::Value;

/// Printed by the engine for a field that resolved to nothing
const NO_VALUE: &str = "<no value>";

/// Result type for template rendering
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while parsing or rendering a template
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("parse error: {message}")]
    Parse { message: String },

    #[error("execution error: {message}")]
    Exec { message: String },

    /// A field reference printed no value under `MissingKey::Error`
    #[error("template references a key that has no value")]
    MissingField,
}

/// What to do when a field reference names a key that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingKey {
    /// Fail with [`Error::MissingField`].
    #[default]
    Error,
    /// Render the reference as empty text.
    Empty,
}

/// Parse and render `source` against `data`.
pub fn render(source: &str, data: &Value, missing: MissingKey) -> Result<String> {
    let mut tmpl = Template::default();
    tmpl.parse(source).map_err(|e| Error::Parse {
        message: e.to_string(),
    })?;

    let out = tmpl
        .render(&Context::from(to_gtmpl(data)))
        .map_err(|e| Error::Exec {
            message: e.to_string(),
        })?;

    if !out.contains(NO_VALUE) {
        return Ok(out);
    }
    match missing {
        MissingKey::Error => Err(Error::MissingField),
        MissingKey::Empty => Ok(out.replace(NO_VALUE, "")),
    }
}

fn to_gtmpl(value: &Value) -> gtmpl::Value {
    match value {
        Value::Null => gtmpl::Value::Nil,
        Value::Bool(b) => gtmpl::Value::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                gtmpl::Value::from(i)
            } else if let Some(u) = n.as_u64() {
                gtmpl::Value::from(u)
            } else {
                gtmpl::Value::from(n.as_f64().unwrap_or_default())
            }
        }
        Value::String(s) => gtmpl::Value::String(s.clone()),
        Value::Array(items) => gtmpl::Value::Array(items.iter().map(to_gtmpl).collect()),
        Value::Object(map) => gtmpl::Value::Map(
            map.iter()
                .map(|(k, v)| (k.clone(), to_gtmpl(v)))
                .collect(),
        ),
    }
}
