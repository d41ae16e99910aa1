//! Test fixtures and utilities for reducing test setup duplication.
//!
//! Builds application directory layouts (`<name>/ebin/<name>.app` plus one
//! `.beam` per module) inside temp directories.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{AppFixture, create_temp_dir};
//!
//! let temp = create_temp_dir();
//! let app_dir = AppFixture::new("cowboy", "2.10.0")
//!     .modules(&["cowboy", "cowboy_req"])
//!     .applications(&["kernel", "stdlib"])
//!     .write_to(temp.path());
//! ```

#![allow(clippy::expect_used)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Write raw descriptor content to `<root>/<name>/ebin/<name>.app`
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_descriptor(root: &Path, name: &str, content: &str) -> PathBuf {
    let ebin = root.join(name).join("ebin");
    std::fs::create_dir_all(&ebin).expect("Failed to create ebin directory");
    let path = ebin.join(format!("{name}.app"));
    std::fs::write(&path, content).expect("Failed to write descriptor");
    path
}

/// Builder for an application directory on disk
pub struct AppFixture {
    name: String,
    vsn: Option<String>,
    modules: Vec<String>,
    applications: Vec<String>,
    included: Vec<String>,
    skip_artifacts: Vec<String>,
}

impl AppFixture {
    pub fn new(name: &str, vsn: &str) -> Self {
        Self {
            name: name.to_string(),
            vsn: Some(vsn.to_string()),
            modules: vec![name.to_string()],
            applications: Vec::new(),
            included: Vec::new(),
            skip_artifacts: Vec::new(),
        }
    }

    /// An application whose descriptor has no `vsn` entry
    pub fn unversioned(name: &str) -> Self {
        Self {
            vsn: None,
            ..Self::new(name, "")
        }
    }

    pub fn modules(mut self, modules: &[&str]) -> Self {
        self.modules = to_strings(modules);
        self
    }

    pub fn applications(mut self, apps: &[&str]) -> Self {
        self.applications = to_strings(apps);
        self
    }

    pub fn included(mut self, apps: &[&str]) -> Self {
        self.included = to_strings(apps);
        self
    }

    /// Modules listed in the descriptor that get no `.beam` file
    pub fn skip_artifacts(mut self, modules: &[&str]) -> Self {
        self.skip_artifacts = to_strings(modules);
        self
    }

    pub fn descriptor(&self) -> String {
        let mut attrs = Vec::new();
        if let Some(vsn) = &self.vsn {
            attrs.push(format!("{{vsn, \"{vsn}\"}}"));
        }
        attrs.push(format!("{{modules, [{}]}}", self.modules.join(", ")));
        if !self.applications.is_empty() {
            attrs.push(format!("{{applications, [{}]}}", self.applications.join(", ")));
        }
        if !self.included.is_empty() {
            attrs.push(format!(
                "{{included_applications, [{}]}}",
                self.included.join(", ")
            ));
        }
        format!(
            "{{application, {},\n [{}]}}.\n",
            self.name,
            attrs.join(",\n  ")
        )
    }

    /// Write the application under `root` and return its directory
    ///
    /// # Panics
    ///
    /// Panics if any file cannot be written.
    pub fn write_to(&self, root: &Path) -> PathBuf {
        let descriptor = write_descriptor(root, &self.name, &self.descriptor());
        let ebin = descriptor.parent().expect("descriptor has a parent");
        for module in &self.modules {
            if !self.skip_artifacts.contains(module) {
                std::fs::write(ebin.join(format!("{module}.beam")), b"FOR1")
                    .expect("Failed to write beam file");
            }
        }
        root.join(&self.name)
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
