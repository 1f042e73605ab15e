//! Checked-in sample module trees.

use std::path::PathBuf;

/// Root of the sample modules shipped in `test-fixtures/modules`.
///
/// Contains `nginx/access` (with an OS-specific `paths` variable and a
/// templated pipeline path) and `syslog/system` (with builtin references
/// and a `range`-driven harvesting config).
pub fn modules_root() -> PathBuf {
    crate::logging::init();
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/modules")
}
