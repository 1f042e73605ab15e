//! [`TestModules`] builder for fileset test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary modules root with helpers to lay out filesets.
///
/// # Example
///
/// ```rust,no_run
/// use fileset_test_utils::TestModules;
///
/// let modules = TestModules::new();
/// modules.write_manifest(
///     "nginx",
///     "access",
///     "var:\n  - name: paths\n    default: [/var/log/nginx/*.log]\n",
/// );
/// modules.assert_file_exists("nginx/access/manifest.yml");
/// ```
pub struct TestModules {
    temp_dir: TempDir,
}

impl Default for TestModules {
    fn default() -> Self {
        Self::new()
    }
}

impl TestModules {
    /// Create an empty modules root.
    pub fn new() -> Self {
        crate::logging::init();
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the modules root.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create an empty module directory and return its path.
    pub fn add_module(&self, module: &str) -> PathBuf {
        let dir = self.root().join(module);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Write `content` to `<root>/<module>/<fileset>/<relative>`, creating
    /// directories as needed, and return the full path.
    pub fn write_file(&self, module: &str, fileset: &str, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(module).join(fileset).join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Write the fileset's `manifest.yml`.
    pub fn write_manifest(&self, module: &str, fileset: &str, content: &str) -> PathBuf {
        self.write_file(module, fileset, "manifest.yml", content)
    }

    /// Lay out a minimal but complete fileset: a manifest whose single
    /// `paths` variable defaults to `paths`, a harvesting config that lists
    /// them, and an empty pipeline at `ingest/default.json`.
    pub fn write_simple_fileset(&self, module: &str, fileset: &str, paths: &[&str]) {
        let defaults = paths
            .iter()
            .map(|p| format!("\"{p}\""))
            .collect::<Vec<_>>()
            .join(", ");
        self.write_manifest(
            module,
            fileset,
            &format!(
                "module_version: \"1.0\"\n\
                 var:\n  - name: paths\n    default: [{defaults}]\n\
                 ingest_pipeline: ingest/default.json\n\
                 prospector: config/input.yml\n"
            ),
        );
        self.write_file(
            module,
            fileset,
            "config/input.yml",
            "input_type: log\npaths:\n{{ range $i, $path := .paths }}\n - {{$path}}\n{{ end }}\n",
        );
        self.write_file(
            module,
            fileset,
            "ingest/default.json",
            "{\"description\": \"pipeline for {{.beat.pipeline_id}}\", \"processors\": []}",
        );
    }

    /// Assert that `path` (relative to the root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }
}
