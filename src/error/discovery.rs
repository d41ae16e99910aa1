//! Discovery warnings and errors
//!
//! A [`DiscoveryWarning`] means a single candidate was unusable and is dropped
//! from the run. A [`DiscoveryError`] fails the whole run; all of them are
//! collected and rendered together.

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;

/// A candidate application that was skipped
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryWarning {
    #[error("{} is not a valid application descriptor: {reason}", .path.display())]
    #[diagnostic(code(relasm::discovery::invalid_descriptor))]
    InvalidDescriptor { path: PathBuf, reason: String },

    #[error("Unable to load application descriptor {}: {reason}", .path.display())]
    #[diagnostic(code(relasm::discovery::unable_to_load))]
    UnableToLoad { path: PathBuf, reason: String },

    #[error(
        "Application {app} is missing compiled module {module} (expected {})",
        .path.display()
    )]
    #[diagnostic(
        code(relasm::discovery::missing_artifact),
        help("Compile the application so every module listed in its descriptor has a .beam file")
    )]
    MissingArtifact {
        app: String,
        module: String,
        path: PathBuf,
    },

    #[error("Permission denied while reading {}", .path.display())]
    #[diagnostic(code(relasm::discovery::access_denied))]
    AccessDenied { path: PathBuf },
}

/// A condition that fails the whole discovery run
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryError {
    #[error(
        "Application {name} in {} does not declare a vsn",
        .path.display()
    )]
    #[diagnostic(
        code(relasm::discovery::unversioned_application),
        help("Add a vsn entry to the application descriptor")
    )]
    UnversionedApplication { name: String, path: PathBuf },

    #[error(
        "Unable to create application record for {name} in {}: {reason}",
        .dir.display()
    )]
    #[diagnostic(code(relasm::discovery::record_construction_failed))]
    RecordConstructionFailed {
        name: String,
        dir: PathBuf,
        reason: String,
    },

    #[error(
        "Override for {name} points at {}, which is not a valid application: {reason}",
        .dir.display()
    )]
    #[diagnostic(
        code(relasm::discovery::invalid_override),
        help("Overrides must point at an application directory containing ebin/<name>.app")
    )]
    InvalidOverride {
        name: String,
        dir: PathBuf,
        reason: String,
    },
}

/// Creates an invalid descriptor warning
pub fn invalid_descriptor(path: &Path, reason: impl Into<String>) -> DiscoveryWarning {
    DiscoveryWarning::InvalidDescriptor {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

/// Classifies an I/O failure on `path` as access denied or a generic load failure
pub fn load_failed(path: &Path, err: &std::io::Error) -> DiscoveryWarning {
    if err.kind() == std::io::ErrorKind::PermissionDenied {
        DiscoveryWarning::AccessDenied {
            path: path.to_path_buf(),
        }
    } else {
        DiscoveryWarning::UnableToLoad {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }
}

/// Creates an invalid override error
pub fn invalid_override(
    name: impl Into<String>,
    dir: &Path,
    reason: impl Into<String>,
) -> DiscoveryError {
    DiscoveryError::InvalidOverride {
        name: name.into(),
        dir: dir.to_path_buf(),
        reason: reason.into(),
    }
}

/// Renders a batch of errors, one per line
pub fn format_errors(errors: &[DiscoveryError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_failed_permission_denied() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let warning = load_failed(Path::new("lib/a/ebin/a.app"), &err);
        assert!(matches!(warning, DiscoveryWarning::AccessDenied { .. }));
    }

    #[test]
    fn test_load_failed_other_io_error_keeps_cause() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let warning = load_failed(Path::new("lib/a/ebin/a.app"), &err);
        match warning {
            DiscoveryWarning::UnableToLoad { reason, .. } => {
                assert!(reason.contains("disk on fire"));
            }
            other => panic!("unexpected warning: {other:?}"),
        }
    }

    #[test]
    fn test_missing_artifact_message() {
        let warning = DiscoveryWarning::MissingArtifact {
            app: "cowboy".to_string(),
            module: "cowboy_req".to_string(),
            path: PathBuf::from("lib/cowboy/ebin/cowboy_req.beam"),
        };
        let text = warning.to_string();
        assert!(text.contains("cowboy"));
        assert!(text.contains("cowboy_req"));
        assert!(text.contains("lib/cowboy/ebin/cowboy_req.beam"));
    }

    #[test]
    fn test_format_errors_renders_every_error() {
        let errors = vec![
            DiscoveryError::UnversionedApplication {
                name: "a".to_string(),
                path: PathBuf::from("lib/a/ebin/a.app"),
            },
            invalid_override("b", Path::new("/src/b"), "no descriptor"),
        ];
        let text = format_errors(&errors);
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("Application a in lib/a/ebin/a.app does not declare a vsn"));
        assert!(text.contains("Override for b points at /src/b"));
    }
}
