//! Loading of a single fileset
//!
//! [`Fileset`] locates a fileset on disk; [`Fileset::read`] loads its
//! manifest and resolves its variables into a [`ResolvedFileset`], which
//! materializes the harvesting config and the ingest pipeline on demand.
//!
//! # Pipeline bodies are templates
//!
//! The ingest pipeline file is expanded against the fileset variables
//! before it is parsed as JSON, so it can reference
//! `{{.beat.pipeline_id}}`. Elasticsearch's own mustache snippets must
//! therefore be escaped: an unmodified upstream pipeline containing
//! `"{{ _ingest.on_failure_message }}"` fails with [`Error::Template`].
//! Write it as `"{{ "{{" }} _ingest.on_failure_message {{ "}}" }}"`.
//!
//! [`Error::Template`]: crate::Error::Template

use std::path::Path;

use serde_json::{Value, json};

use fileset_fs::{ConfigFormat, FilesetPath, NormalizedPath, io};

use crate::config::{FilesetConfig, ModuleConfig};
use crate::error::TemplateSite;
use crate::host::{HostFacts, SystemHost, current_os};
use crate::manifest::Manifest;
use crate::materialize::Materializer;
use crate::pipeline::format_pipeline_id;
use crate::template::MissingKey;
use crate::vars::{BEAT_KEY, Environment, PIPELINE_ID_KEY, Resolver, VarValue};
use crate::{Error, Result};

const INGEST_PIPELINE_KEY: &str = "ingest_pipeline";
const PROSPECTOR_KEY: &str = "prospector";

/// A fileset located on disk, not yet read.
pub struct Fileset {
    name: String,
    module: String,
    module_path: NormalizedPath,
    config: FilesetConfig,
    host: Box<dyn HostFacts>,
    os: String,
    missing: MissingKey,
}

impl std::fmt::Debug for Fileset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fileset")
            .field("name", &self.name)
            .field("module", &self.module)
            .field("module_path", &self.module_path)
            .field("os", &self.os)
            .field("missing", &self.missing)
            .finish_non_exhaustive()
    }
}

impl Fileset {
    /// Locate fileset `name` of the module selected by `module_config`
    /// under `modules_path`.
    ///
    /// Fails with [`Error::MissingModule`] if the module directory does not
    /// exist. The fileset directory itself is only touched by [`read`].
    ///
    /// [`read`]: Fileset::read
    pub fn new(
        modules_path: impl AsRef<Path>,
        name: &str,
        module_config: &ModuleConfig,
        config: FilesetConfig,
    ) -> Result<Self> {
        let module_path = NormalizedPath::new(modules_path).join(&module_config.module);
        io::require_dir(&module_path).map_err(|_| Error::MissingModule {
            module: module_config.module.clone(),
            path: module_path.to_native(),
        })?;

        Ok(Self {
            name: name.to_string(),
            module: module_config.module.clone(),
            module_path,
            config,
            host: Box::new(SystemHost),
            os: current_os().to_string(),
            missing: MissingKey::default(),
        })
    }

    /// Take host facts from `host` instead of the operating system.
    pub fn with_host(mut self, host: impl HostFacts + 'static) -> Self {
        self.host = Box::new(host);
        self
    }

    /// Resolve OS-specific variables for `os` instead of the running OS.
    pub fn with_os(mut self, os: impl Into<String>) -> Self {
        self.os = os.into();
        self
    }

    /// Choose how templates treat references to undeclared variables.
    pub fn with_missing_key(mut self, missing: MissingKey) -> Self {
        self.missing = missing;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    /// `<modules root>/<module>/<fileset>`
    pub fn dir(&self) -> NormalizedPath {
        self.module_path.join(&self.name)
    }

    /// Read the manifest and resolve the fileset's variables.
    ///
    /// Adds `beat.pipeline_id` to the environment once the pipeline path
    /// has been expanded.
    pub fn read(&self) -> Result<ResolvedFileset> {
        let dir = self.dir();
        let manifest = Manifest::load(&dir.join(FilesetPath::Manifest.as_str()))?;

        let mut vars = Resolver::new(self.host.as_ref(), self.os.as_str())
            .missing_key(self.missing)
            .resolve(&manifest.vars, &self.config.var)?;

        let pipeline_path = vars
            .expand(&manifest.ingest_pipeline, self.missing)
            .map_err(|e| {
                Error::template(
                    TemplateSite::ManifestPath(INGEST_PIPELINE_KEY),
                    &manifest.ingest_pipeline,
                    e,
                )
            })?;
        let pipeline_id = format_pipeline_id(&self.module, &self.name, &pipeline_path);
        vars.insert(BEAT_KEY, VarValue::Opaque(json!({ PIPELINE_ID_KEY: pipeline_id.as_str() })));

        tracing::debug!(
            module = %self.module,
            fileset = %self.name,
            module_version = %manifest.module_version,
            variables = vars.len(),
            "Read fileset"
        );

        Ok(ResolvedFileset {
            name: self.name.clone(),
            module: self.module.clone(),
            dir,
            prospector_overrides: self.config.prospector.clone(),
            manifest,
            vars,
            pipeline_id,
            missing: self.missing,
        })
    }
}

/// A fileset whose manifest has been read and whose variables are resolved.
#[derive(Debug, Clone)]
pub struct ResolvedFileset {
    name: String,
    module: String,
    dir: NormalizedPath,
    prospector_overrides: Value,
    manifest: Manifest,
    vars: Environment,
    pipeline_id: String,
    missing: MissingKey,
}

impl ResolvedFileset {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// The resolved variables, including `builtin` and `beat`.
    pub fn vars(&self) -> &Environment {
        &self.vars
    }

    pub fn pipeline_id(&self) -> &str {
        &self.pipeline_id
    }

    fn materializer(&self) -> Materializer<'_> {
        Materializer::new(&self.dir, &self.vars).missing_key(self.missing)
    }

    /// The harvesting config with the caller's `prospector` overrides merged in.
    pub fn prospector_config(&self) -> Result<Value> {
        let config = self.materializer().load(
            PROSPECTOR_KEY,
            &self.manifest.prospector,
            ConfigFormat::Yaml,
            &self.prospector_overrides,
        )?;
        tracing::debug!(
            "Merged prospector config for fileset {}/{}",
            self.module,
            self.name
        );
        Ok(config)
    }

    /// The pipeline identifier and the parsed pipeline definition.
    ///
    /// The body is template-expanded first; see the module docs for
    /// escaping Elasticsearch `{{ }}` snippets.
    pub fn pipeline(&self) -> Result<(String, Value)> {
        let materializer = self.materializer();
        let path = materializer.expand(
            TemplateSite::ManifestPath(INGEST_PIPELINE_KEY),
            &self.manifest.ingest_pipeline,
        )?;
        let body = materializer.load(
            INGEST_PIPELINE_KEY,
            &self.manifest.ingest_pipeline,
            ConfigFormat::Json,
            &Value::Null,
        )?;
        Ok((format_pipeline_id(&self.module, &self.name, &path), body))
    }
}
