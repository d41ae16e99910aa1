//! Release configuration (relasm.yaml) data structures

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::discovery::DiscoveryOptions;
use crate::error::{RelasmError, Result, config};

/// File name looked up in the current directory and the user config directory
pub const CONFIG_FILE_NAME: &str = "relasm.yaml";

/// Discovery settings from relasm.yaml
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReleaseConfig {
    /// Library directories to scan
    #[serde(default)]
    pub lib_dirs: Vec<PathBuf>,

    /// Only look one level deep (`<lib>/*/ebin`)
    #[serde(default)]
    pub shallow: bool,

    /// Applications left out of the result
    #[serde(default)]
    pub skip: Vec<String>,

    /// Applications taken from an explicit directory
    #[serde(default)]
    pub overrides: BTreeMap<String, PathBuf>,
}

impl ReleaseConfig {
    /// Parse release configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file, resolving relative paths against its directory
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| config::read_failed(path.display().to_string(), e.to_string()))?;
        let parsed = Self::from_yaml(&yaml).map_err(|err| match err {
            RelasmError::ConfigParseFailed { reason, .. } => {
                config::parse_failed(path.display().to_string(), reason)
            }
            other => other,
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(parsed.resolve_relative(base))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.skip.iter().any(|name| name.trim().is_empty()) {
            return Err(config::invalid("skip list contains an empty application name"));
        }
        if self.overrides.keys().any(|name| name.trim().is_empty()) {
            return Err(config::invalid("override with an empty application name"));
        }
        Ok(())
    }

    /// Make every relative path absolute against `base`
    #[must_use]
    pub fn resolve_relative(mut self, base: &Path) -> Self {
        for dir in &mut self.lib_dirs {
            *dir = base.join(&*dir);
        }
        for dir in self.overrides.values_mut() {
            *dir = base.join(&*dir);
        }
        self
    }

    /// Convert into discovery inputs, normalizing every path
    pub fn into_options(self) -> DiscoveryOptions {
        DiscoveryOptions {
            lib_dirs: self.lib_dirs.iter().map(|p| normalize_path(p)).collect(),
            shallow: self.shallow,
            skip: self.skip.into_iter().collect(),
            overrides: self
                .overrides
                .into_iter()
                .map(|(name, dir)| {
                    let dir = normalize_path(&dir);
                    (name, dir)
                })
                .collect(),
        }
    }
}

/// Canonicalize `path` when it exists, otherwise return it unchanged
pub fn normalize_path(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Load configuration from the explicit path, `./relasm.yaml`, or the user
/// config directory, in that order
///
/// Returns the default configuration when no implicit file exists.
///
/// # Errors
///
/// Returns `RelasmError::ConfigNotFound` if `explicit` does not exist, or a
/// read/parse error for the file that was found.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<ReleaseConfig> {
    let user_dir = dirs::config_dir().map(|d| d.join("relasm"));
    match locate(explicit, cwd, user_dir.as_deref())? {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading configuration");
            ReleaseConfig::load(&path)
        }
        None => Ok(ReleaseConfig::default()),
    }
}

fn locate(explicit: Option<&Path>, cwd: &Path, user_dir: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        let path = cwd.join(path);
        if !path.is_file() {
            return Err(config::not_found(path.display().to_string()));
        }
        return Ok(Some(path));
    }

    let mut candidates = std::iter::once(cwd.join(CONFIG_FILE_NAME))
        .chain(user_dir.map(|d| d.join(CONFIG_FILE_NAME)));
    Ok(candidates.find(|p| p.is_file()))
}
