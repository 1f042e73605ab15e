//! Filesystem layer for the fileset loader
//!
//! Provides normalized path handling, path-aware reads and format-aware
//! parsing of the YAML and JSON documents a fileset is made of.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use config::{ConfigFormat, ConfigStore};
pub use constants::FilesetPath;
pub use error::{Error, Result};
pub use path::NormalizedPath;
