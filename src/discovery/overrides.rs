//! Override resolution
//!
//! An override names an application and the directory it must be taken from.
//! The overriding application is validated like a discovered one, marked as
//! linked, and replaces any discovered application of the same name.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::descriptor;
use crate::domain::ApplicationRecord;
use crate::error::DiscoveryError;
use crate::error::discovery::invalid_override;

use super::outcome::Outcome;
use super::pipeline;

/// Splice overrides in front of the discovered records they mask
///
/// Returns one entry per override followed by every discovered record whose
/// name is not overridden.
pub fn apply_overrides(
    records: Vec<ApplicationRecord>,
    overrides: &BTreeMap<String, PathBuf>,
) -> Vec<Result<ApplicationRecord, DiscoveryError>> {
    let mut resolved: Vec<_> = overrides
        .iter()
        .map(|(name, dir)| resolve_override(name, dir))
        .collect();

    resolved.extend(
        records
            .into_iter()
            .filter(|record| !overrides.contains_key(record.name()))
            .map(Ok),
    );

    resolved
}

fn resolve_override(name: &str, dir: &Path) -> Result<ApplicationRecord, DiscoveryError> {
    let path = descriptor::descriptor_path(dir, name);
    if !path.is_file() {
        return Err(invalid_override(
            name,
            dir,
            format!("no application descriptor at {}", path.display()),
        ));
    }

    match pipeline::validate_descriptor(&path) {
        Outcome::Success(record) if record.name() == name => {
            tracing::debug!(app = name, dir = %dir.display(), "using override");
            Ok(record.into_linked())
        }
        Outcome::Success(record) => Err(invalid_override(
            name,
            dir,
            format!("descriptor declares application {}", record.name()),
        )),
        Outcome::Error(err) => Err(err),
        Outcome::Warning(warning) => Err(invalid_override(name, dir, warning.to_string())),
        Outcome::NoResult => Err(invalid_override(name, dir, "not an application descriptor")),
    }
}
