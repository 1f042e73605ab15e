//! Fileset loading and materialization
//!
//! A module directory holds one directory per fileset:
//!
//! ```text
//! <modules root>/
//!   nginx/
//!     access/
//!       manifest.yml
//!       config/nginx-access.yml
//!       ingest/default.json
//! ```
//!
//! Loading a fileset reads `manifest.yml`, resolves its variables in
//! declaration order (builtins, defaults, OS-specific values, then caller
//! overrides) and uses the result to expand the manifest's path templates
//! and the templates inside the files they name.
//!
//! # Example
//!
//! ```no_run
//! use fileset_core::{Fileset, FilesetConfig, ModuleConfig};
//!
//! fn example() -> fileset_core::Result<()> {
//!     let module = ModuleConfig::new("nginx");
//!     let fileset = Fileset::new("/usr/share/modules", "access", &module, FilesetConfig::default())?
//!         .read()?;
//!
//!     let prospector = fileset.prospector_config()?;
//!     let (pipeline_id, pipeline) = fileset.pipeline()?;
//!     println!("{pipeline_id}: {pipeline} / {prospector}");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod fileset;
pub mod host;
pub mod manifest;
pub mod materialize;
pub mod pipeline;
pub mod template;
pub mod vars;

pub use config::{FilesetConfig, ModuleConfig};
pub use error::{Error, Result, TemplateSite, VarField};
pub use fileset::{Fileset, ResolvedFileset};
pub use host::{BuiltinVars, HostFacts, StaticHost, SystemHost, current_os};
pub use manifest::{Manifest, VarDeclaration};
pub use materialize::Materializer;
pub use pipeline::{format_pipeline_id, remove_ext};
pub use template::MissingKey;
pub use vars::{Environment, Resolver, VarValue};
