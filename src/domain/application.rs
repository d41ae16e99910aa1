//! Application domain types

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::DiscoveryError;

/// A validated, versioned application ready to be placed in a release
///
/// Name and version are never empty once a record exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationRecord {
    name: String,
    vsn: String,
    dir: PathBuf,
    applications: Vec<String>,
    included_applications: Vec<String>,
    linked: bool,
}

impl ApplicationRecord {
    /// Create a record for an application rooted at `dir`
    ///
    /// # Errors
    ///
    /// Returns `DiscoveryError::RecordConstructionFailed` if the name or the
    /// version is empty or contains characters that cannot appear in a
    /// release directory name.
    pub fn new(
        name: impl Into<String>,
        vsn: impl Into<String>,
        dir: impl Into<PathBuf>,
        applications: Vec<String>,
        included_applications: Vec<String>,
    ) -> Result<Self, DiscoveryError> {
        let name = name.into();
        let vsn = vsn.into();
        let dir = dir.into();

        if let Err(reason) = check_name(&name).and_then(|()| check_vsn(&vsn)) {
            return Err(DiscoveryError::RecordConstructionFailed { name, dir, reason });
        }

        Ok(Self {
            name,
            vsn,
            dir,
            applications,
            included_applications,
            linked: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vsn(&self) -> &str {
        &self.vsn
    }

    /// Application root directory (the parent of `ebin`)
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Applications that must be started before this one
    pub fn applications(&self) -> &[String] {
        &self.applications
    }

    /// Applications bundled with this one but not started
    pub fn included_applications(&self) -> &[String] {
        &self.included_applications
    }

    /// Whether the record came from an override and should be symlinked
    pub fn is_linked(&self) -> bool {
        self.linked
    }

    #[must_use]
    pub fn into_linked(mut self) -> Self {
        self.linked = true;
        self
    }

    /// `name-vsn`, the directory name used inside a release
    pub fn versioned_name(&self) -> String {
        format!("{}-{}", self.name, self.vsn)
    }
}

fn check_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("application name is empty".to_string());
    }
    if name.chars().any(|c| c.is_whitespace() || c == '/' || c == '\\') {
        return Err(format!(
            "application name '{name}' contains whitespace or a path separator"
        ));
    }
    Ok(())
}

fn check_vsn(vsn: &str) -> Result<(), String> {
    if vsn.is_empty() {
        return Err("version is empty".to_string());
    }
    if vsn.chars().any(char::is_whitespace) {
        return Err(format!("version '{vsn}' contains whitespace"));
    }
    Ok(())
}
