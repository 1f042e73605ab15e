//! Error types for fileset-core

use std::fmt;
use std::path::PathBuf;

use crate::template;

/// Result type for fileset-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Where a failing template came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSite {
    /// The (possibly OS-specific) value of a declared variable
    Variable(String),
    /// One element of a sequence-valued variable
    SequenceElement { variable: String, index: usize },
    /// A path template from the manifest (`prospector`, `ingest_pipeline`)
    ManifestPath(&'static str),
    /// The contents of a file read from the fileset directory
    File(PathBuf),
}

impl fmt::Display for TemplateSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variable(name) => write!(f, "variable {name}"),
            Self::SequenceElement { variable, index } => {
                write!(f, "variable {variable} (array element {index})")
            }
            Self::ManifestPath(key) => write!(f, "the {key} path"),
            Self::File(path) => write!(f, "file {}", path.display()),
        }
    }
}

/// The key a variable declaration is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarField {
    Name,
    Default,
}

impl fmt::Display for VarField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => f.write_str("string 'name'"),
            Self::Default => f.write_str("'default'"),
        }
    }
}

/// Errors that can occur while loading a fileset
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The module directory does not exist
    #[error("Module {module} ({path}) doesn't exist")]
    MissingModule { module: String, path: PathBuf },

    /// The manifest file could not be read
    #[error("Error reading manifest file {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest file is not valid structured config
    #[error("Error unpacking manifest {path}: {message}")]
    ManifestUnpack { path: PathBuf, message: String },

    /// A `var` entry lacks `name` or `default`
    #[error("Variable {} doesn't have a {field} key", describe_var(.index, .name))]
    MissingVariableField {
        index: usize,
        name: Option<String>,
        field: VarField,
    },

    /// A template failed to parse or evaluate
    #[error("Error resolving {site}: template {template:?}: {source}")]
    Template {
        site: TemplateSite,
        template: String,
        #[source]
        source: template::Error,
    },

    /// The hostname could not be determined
    #[error("Error getting the hostname: {reason}")]
    HostResolution { reason: String },

    /// A file referenced by the manifest could not be read
    #[error("Error reading file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file referenced by the manifest is not valid structured config
    #[error("Error parsing {format} file {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    /// Caller overrides could not be merged into a loaded document
    #[error("Error applying config overrides to {path}: {reason}")]
    OverrideMerge { path: PathBuf, reason: String },

    /// Any other filesystem-layer error
    #[error(transparent)]
    Fs(#[from] fileset_fs::Error),
}

fn describe_var(index: &usize, name: &Option<String>) -> String {
    match name {
        Some(name) => format!("{name} (#{index})"),
        None => format!("#{index}"),
    }
}

impl Error {
    /// Wrap a template error with the place it came from.
    pub fn template(site: TemplateSite, template: &str, source: template::Error) -> Self {
        Self::Template {
            site,
            template: template.to_string(),
            source,
        }
    }

    /// Convert a filesystem error raised while reading a manifest-referenced
    /// file into the matching kind.
    pub(crate) fn from_file(err: fileset_fs::Error) -> Self {
        match err {
            fileset_fs::Error::Io { path, source } => Self::FileRead { path, source },
            fileset_fs::Error::ConfigParse {
                path,
                format,
                message,
            } => Self::ConfigParse {
                path,
                format,
                message,
            },
            other => Self::Fs(other),
        }
    }

    /// Same as [`Error::from_file`] for the manifest itself.
    pub(crate) fn from_manifest(err: fileset_fs::Error) -> Self {
        match err {
            fileset_fs::Error::Io { path, source } => Self::ManifestRead { path, source },
            fileset_fs::Error::ConfigParse { path, message, .. } => {
                Self::ManifestUnpack { path, message }
            }
            other => Self::Fs(other),
        }
    }
}
