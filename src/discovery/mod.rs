//! Application discovery
//!
//! This module provides:
//! - Classification of filesystem entries as descriptor candidates
//! - The validation pipeline that turns a descriptor into a record
//! - Recursive and shallow scanning of library directories
//! - Override resolution and the skip list
//!
//! Warnings are logged and dropped. Errors are collected and fail the run
//! together.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use crate::domain::ApplicationRecord;
use crate::error::DiscoveryError;

pub mod classify;
pub mod outcome;
pub mod overrides;
pub mod pipeline;
pub mod walk;

pub use classify::{EntryKind, classify};
pub use outcome::{Outcome, Partition};
pub use overrides::apply_overrides;
pub use walk::{TreeVisitor, WalkDirVisitor, shallow_scan};

/// Inputs for one discovery run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Library roots to scan
    pub lib_dirs: Vec<PathBuf>,
    /// Only scan `<lib>/ebin` and `<lib>/*/ebin`
    pub shallow: bool,
    /// Applications removed from the result
    pub skip: BTreeSet<String>,
    /// Application name to the directory it must be taken from
    pub overrides: BTreeMap<String, PathBuf>,
}

/// Discover applications using the recursive `walkdir` traversal
///
/// # Errors
///
/// Returns every [`DiscoveryError`] produced by the run.
pub fn discover(options: &DiscoveryOptions) -> Result<Vec<ApplicationRecord>, Vec<DiscoveryError>> {
    discover_with(&WalkDirVisitor, options)
}

/// Discover applications with an injected traversal
///
/// `visitor` is only used for non-shallow runs.
///
/// # Errors
///
/// Returns every [`DiscoveryError`] from natural discovery followed by every
/// error from override resolution.
pub fn discover_with(
    visitor: &dyn TreeVisitor,
    options: &DiscoveryOptions,
) -> Result<Vec<ApplicationRecord>, Vec<DiscoveryError>> {
    let mut outcomes = Vec::new();
    for lib_dir in &options.lib_dirs {
        tracing::debug!(dir = %lib_dir.display(), shallow = options.shallow, "scanning library directory");
        let found = if options.shallow {
            shallow_scan(lib_dir, &mut classify)
        } else {
            visitor.visit(lib_dir, &mut classify)
        };
        outcomes.extend(found);
    }

    let mut partition: Partition = outcomes.into_iter().collect();
    let discovered = std::mem::take(&mut partition.records);
    partition.extend(apply_overrides(discovered, &options.overrides));
    let mut resolved = partition.settle()?;

    resolved.retain(|record| !options.skip.contains(record.name()));

    tracing::debug!(
        "Resolved the following applications: {}",
        resolved
            .iter()
            .map(|r| format!("{} ({})", r.versioned_name(), r.dir().display()))
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(resolved)
}
