//! Host facts exposed to templates as `builtin` variables
//!
//! The hostname is the only process-wide fact a fileset reads. It is
//! behind the [`HostFacts`] trait so resolution can be driven by a fixed
//! name in tests and embedders.

use serde::Serialize;
use serde_json::Value;

use crate::{Error, Result};

/// Source of the local host's fully-qualified name.
pub trait HostFacts {
    fn hostname(&self) -> Result<String>;
}

/// Reads the hostname from the operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHost;

impl HostFacts for SystemHost {
    fn hostname(&self) -> Result<String> {
        let name = hostname::get().map_err(|e| Error::HostResolution {
            reason: e.to_string(),
        })?;
        name.into_string().map_err(|raw| Error::HostResolution {
            reason: format!("hostname {raw:?} is not valid UTF-8"),
        })
    }
}

/// Returns a fixed hostname.
#[derive(Debug, Clone)]
pub struct StaticHost(pub String);

impl StaticHost {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl HostFacts for StaticHost {
    fn hostname(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// The `builtin` entry of a variable environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuiltinVars {
    pub hostname: String,
    pub domain: String,
}

impl BuiltinVars {
    /// Split the host's name on the first `.` into hostname and domain.
    pub fn from_host(host: &dyn HostFacts) -> Result<Self> {
        let fqdn = host.hostname()?;
        if fqdn.is_empty() {
            return Err(Error::HostResolution {
                reason: "hostname is empty".into(),
            });
        }
        let (hostname, domain) = fqdn.split_once('.').unwrap_or((fqdn.as_str(), ""));
        Ok(Self {
            hostname: hostname.to_string(),
            domain: domain.to_string(),
        })
    }

    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "hostname": self.hostname,
            "domain": self.domain,
        })
    }
}

/// Identifier of the running operating system, as used for the `os` keys of
/// variable declarations (`linux`, `darwin`, `windows`, ...).
pub fn current_os() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        other => other,
    }
}
