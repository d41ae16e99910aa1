//! Common test utilities for relasm integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch directory holding library trees for a test
pub struct TestWorkspace {
    /// Temporary directory
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Create an application with one module per entry in `modules`
    ///
    /// `parent` is relative to the workspace root. Returns the application
    /// directory.
    pub fn create_app(&self, parent: &str, name: &str, vsn: Option<&str>, modules: &[&str]) -> PathBuf {
        let app_dir = self.path.join(parent).join(name);
        let vsn_attr = vsn
            .map(|v| format!("{{vsn, \"{v}\"}}, "))
            .unwrap_or_default();
        self.write_file(
            &format!("{parent}/{name}/ebin/{name}.app"),
            &format!(
                "{{application, {name}, [{vsn_attr}{{modules, [{}]}}, {{applications, [kernel, stdlib]}}]}}.\n",
                modules.join(", ")
            ),
        );
        for module in modules {
            self.write_file(&format!("{parent}/{name}/ebin/{module}.beam"), "FOR1");
        }
        app_dir
    }

    /// Remove a compiled module from an application
    pub fn remove_beam(&self, app_dir: &Path, module: &str) {
        std::fs::remove_file(app_dir.join("ebin").join(format!("{module}.beam")))
            .expect("Failed to remove beam file");
    }
}
