//! Parsing of a fileset's `manifest.yml`
//!
//! # Example YAML
//!
//! ```yaml
//! module_version: "1.0"
//!
//! var:
//!   - name: paths
//!     default:
//!       - /var/log/nginx/access.log*
//!     os:
//!       darwin:
//!         - /usr/local/var/log/nginx/access.log*
//!       windows:
//!         - c:/programdata/nginx/logs/*access.log*
//!
//! ingest_pipeline: ingest/default.json
//! prospector: config/nginx-access.yml
//! ```
//!
//! Only the `os` mapping is consulted for OS-specific values; other keys on a
//! declaration are ignored.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use fileset_fs::{ConfigFormat, ConfigStore, FilesetPath, NormalizedPath};

use crate::{Error, Result};

/// Manifest of a single fileset.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Manifest {
    /// Version of the module the fileset belongs to
    #[serde(default)]
    pub module_version: String,

    /// Variable declarations, in resolution order
    #[serde(default, rename = "var")]
    pub vars: Vec<VarDeclaration>,

    /// Template of the pipeline definition path, relative to the fileset
    #[serde(default)]
    pub ingest_pipeline: String,

    /// Template of the harvesting config path, relative to the fileset
    #[serde(default)]
    pub prospector: String,
}

impl Manifest {
    /// Load a manifest file.
    ///
    /// Read failures surface as [`Error::ManifestRead`], malformed content as
    /// [`Error::ManifestUnpack`].
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        tracing::debug!(path = %path, "Loading manifest");
        ConfigStore::new().load(path).map_err(Error::from_manifest)
    }

    /// Parse manifest YAML held in memory.
    pub fn parse(content: &str) -> Result<Self> {
        let path = NormalizedPath::new(FilesetPath::Manifest.as_str());
        ConfigFormat::Yaml
            .parse(content, &path)
            .map_err(Error::from_manifest)
    }
}

/// One entry of the manifest's `var` sequence.
///
/// `name` and `default` are kept loosely typed so that a missing or
/// mistyped key is reported as [`Error::MissingVariableField`] at resolution
/// time rather than as an unpack failure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct VarDeclaration {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,

    /// Present even when declared as `null`
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// OS identifier -> replacement value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<Value>,
}

impl VarDeclaration {
    pub fn new(name: impl Into<String>, default: Value) -> Self {
        Self {
            name: Some(Value::String(name.into())),
            default: Some(default),
            os: None,
        }
    }

    /// Add an OS-specific replacement for the default.
    pub fn with_os(mut self, os: impl Into<String>, value: Value) -> Self {
        let mut map = match self.os.take() {
            Some(Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        };
        map.insert(os.into(), value);
        self.os = Some(Value::Object(map));
        self
    }

    /// The declared name, if it is a string.
    pub fn name(&self) -> Option<&str> {
        self.name.as_ref()?.as_str()
    }

    /// The replacement value for exactly `os`, if the declaration has one.
    pub fn os_value(&self, os: &str) -> Option<&Value> {
        self.os.as_ref()?.as_object()?.get(os)
    }
}

/// Wraps any present value, including `null`, in `Some`.
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn parses_all_keys_in_order() {
        let manifest = Manifest::parse(
            r#"
module_version: "1.0"
var:
  - name: paths
    default: ["/var/log/nginx/access.log*"]
    os:
      darwin: ["/usr/local/var/log/nginx/access.log*"]
  - name: pipeline
    default: default
ingest_pipeline: ingest/{{.pipeline}}.json
prospector: config/nginx-access.yml
"#,
        )
        .unwrap();

        assert_eq!(manifest.module_version, "1.0");
        assert_eq!(manifest.vars.len(), 2);
        assert_eq!(manifest.vars[0].name(), Some("paths"));
        assert_eq!(
            manifest.vars[0].os_value("darwin"),
            Some(&json!(["/usr/local/var/log/nginx/access.log*"]))
        );
        assert_eq!(manifest.vars[0].os_value("linux"), None);
        assert_eq!(manifest.vars[1].name(), Some("pipeline"));
        assert_eq!(manifest.ingest_pipeline, "ingest/{{.pipeline}}.json");
        assert_eq!(manifest.prospector, "config/nginx-access.yml");
    }

    #[test]
    fn null_default_counts_as_present() {
        let manifest = Manifest::parse("var:\n  - name: x\n    default: ~\n  - name: y\n").unwrap();
        assert_eq!(manifest.vars[0].default, Some(Value::Null));
        assert_eq!(manifest.vars[1].default, None);
    }

    #[test]
    fn non_string_name_is_not_a_name() {
        let manifest = Manifest::parse("var:\n  - name: 42\n    default: a\n").unwrap();
        assert_eq!(manifest.vars[0].name(), None);
    }

    #[test]
    fn malformed_yaml_is_an_unpack_error() {
        let err = Manifest::parse("var: [unclosed\n").unwrap_err();
        assert!(matches!(err, Error::ManifestUnpack { .. }), "{err:?}");
    }

    #[test]
    fn with_os_accumulates_entries() {
        let decl = VarDeclaration::new("p", json!("A"))
            .with_os("linux", json!("B"))
            .with_os("windows", json!("C"));
        assert_eq!(decl.os, Some(json!({"linux": "B", "windows": "C"})));
    }
}
