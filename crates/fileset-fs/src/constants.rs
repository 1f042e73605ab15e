//! Well-known names inside a modules directory.

/// Fixed file names a fileset directory is expected to contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilesetPath {
    /// The `manifest.yml` file describing variables and template paths
    Manifest,
}

impl FilesetPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manifest => "manifest.yml",
        }
    }
}
