//! Decides whether a filesystem entry is an application descriptor

use std::path::Path;

use crate::descriptor::{ARTIFACT_DIR, DESCRIPTOR_EXTENSION};

use super::outcome::Outcome;
use super::pipeline;

/// Type of a visited filesystem entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// Classify one entry, validating it when it is a descriptor candidate
///
/// Directories never produce a result; the walker descends into them.
pub fn classify(path: &Path, kind: EntryKind) -> Outcome {
    match kind {
        EntryKind::File if is_descriptor_candidate(path) => pipeline::validate_descriptor(path),
        EntryKind::File | EntryKind::Directory => Outcome::NoResult,
    }
}

/// A candidate is a `.app` file whose parent directory is `ebin`
pub fn is_descriptor_candidate(path: &Path) -> bool {
    let in_artifact_dir = path
        .parent()
        .and_then(Path::file_name)
        .is_some_and(|dir| dir == ARTIFACT_DIR);
    let has_descriptor_extension = path
        .extension()
        .is_some_and(|ext| ext == DESCRIPTOR_EXTENSION);
    in_artifact_dir && has_descriptor_extension
}
