//! Validation pipeline for a single descriptor candidate
//!
//! Stages run in order and stop at the first failure:
//! load → module list → compiled artifacts → version → dependencies → record.
//! Each stage returns a [`Rejection`] on failure, which becomes a warning or an
//! error outcome.

use std::path::Path;

use crate::descriptor::{self, AppDescriptor, DescriptorError};
use crate::domain::ApplicationRecord;
use crate::error::discovery::{invalid_descriptor, load_failed};
use crate::error::{DiscoveryError, DiscoveryWarning};

use super::outcome::Outcome;

/// Why a stage stopped the pipeline
#[derive(Debug)]
enum Rejection {
    Warning(DiscoveryWarning),
    Error(DiscoveryError),
}

impl From<DiscoveryWarning> for Rejection {
    fn from(warning: DiscoveryWarning) -> Self {
        Rejection::Warning(warning)
    }
}

impl From<DiscoveryError> for Rejection {
    fn from(error: DiscoveryError) -> Self {
        Rejection::Error(error)
    }
}

impl From<Rejection> for Outcome {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::Warning(w) => Outcome::Warning(w),
            Rejection::Error(e) => Outcome::Error(e),
        }
    }
}

type Stage<T> = Result<T, Rejection>;

/// Validate the descriptor at `path` into an application record
pub fn validate_descriptor(path: &Path) -> Outcome {
    match run_stages(path) {
        Ok(record) => Outcome::Success(record),
        Err(rejection) => rejection.into(),
    }
}

fn run_stages(path: &Path) -> Stage<ApplicationRecord> {
    let descriptor = load(path)?;
    let modules = module_list(&descriptor, path)?;
    let ebin_dir = path.parent().unwrap_or_else(|| Path::new(""));
    verify_artifacts(&descriptor.name, &modules, ebin_dir)?;
    let vsn = version(&descriptor, path)?;
    let (applications, included_applications) = dependencies(&descriptor, path)?;

    let app_dir = ebin_dir.parent().unwrap_or_else(|| Path::new(""));
    let record = ApplicationRecord::new(
        descriptor.name,
        vsn,
        app_dir,
        applications,
        included_applications,
    )?;
    Ok(record)
}

fn load(path: &Path) -> Stage<AppDescriptor> {
    let src = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::InvalidData {
            invalid_descriptor(path, "file is not valid UTF-8")
        } else {
            load_failed(path, &e)
        }
    })?;
    AppDescriptor::parse(&src).map_err(|e| invalid_descriptor(path, e.to_string()).into())
}

fn module_list(descriptor: &AppDescriptor, path: &Path) -> Stage<Vec<String>> {
    descriptor
        .atom_list("modules")
        .map_err(|e| invalid(path, &e))?
        .ok_or_else(|| invalid_descriptor(path, "missing 'modules' attribute").into())
}

/// Stops at the first module without a compiled artifact
fn verify_artifacts(app: &str, modules: &[String], ebin_dir: &Path) -> Stage<()> {
    for module in modules {
        let artifact = descriptor::artifact_path(ebin_dir, module);
        if !artifact.is_file() {
            return Err(DiscoveryWarning::MissingArtifact {
                app: app.to_string(),
                module: module.clone(),
                path: artifact,
            }
            .into());
        }
    }
    Ok(())
}

fn version(descriptor: &AppDescriptor, path: &Path) -> Stage<String> {
    let Some(term) = descriptor.get("vsn") else {
        return Err(DiscoveryError::UnversionedApplication {
            name: descriptor.name.clone(),
            path: path.to_path_buf(),
        }
        .into());
    };
    term.as_str().map(str::to_string).ok_or_else(|| {
        DiscoveryError::RecordConstructionFailed {
            name: descriptor.name.clone(),
            dir: path.to_path_buf(),
            reason: format!("vsn must be a string, found {}", term.kind()),
        }
        .into()
    })
}

fn dependencies(descriptor: &AppDescriptor, path: &Path) -> Stage<(Vec<String>, Vec<String>)> {
    let applications = descriptor
        .atom_list("applications")
        .map_err(|e| invalid(path, &e))?
        .unwrap_or_default();
    let included = descriptor
        .atom_list("included_applications")
        .map_err(|e| invalid(path, &e))?
        .unwrap_or_default();
    Ok((applications, included))
}

fn invalid(path: &Path, err: &DescriptorError) -> Rejection {
    invalid_descriptor(path, err.to_string()).into()
}
