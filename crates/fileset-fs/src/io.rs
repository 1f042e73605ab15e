//! Path-aware read operations

use std::fs;

use crate::{Error, NormalizedPath, Result};

/// Read text content from a file.
///
/// The returned error carries the native path that failed.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    tracing::trace!(path = %path, "Reading file");
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Fail with an `Io` error of kind `NotFound` unless `path` is a directory.
pub fn require_dir(path: &NormalizedPath) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    Err(Error::io(
        path.to_native(),
        std::io::Error::new(std::io::ErrorKind::NotFound, "directory does not exist"),
    ))
}
