//! Directory traversal for discovery
//!
//! [`TreeVisitor`] is the seam between the orchestrator and the filesystem
//! walk. [`WalkDirVisitor`] does a full recursive walk; [`shallow_scan`] only
//! looks at `<root>/ebin` and `<root>/*/ebin`.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::descriptor::ARTIFACT_DIR;
use crate::error::DiscoveryWarning;
use crate::error::discovery::load_failed;

use super::classify::EntryKind;
use super::outcome::Outcome;

/// Callback invoked for every visited entry
pub type Classifier<'a> = dyn FnMut(&Path, EntryKind) -> Outcome + 'a;

/// Recursive traversal collaborator
///
/// Implementations visit every file and directory under `root` once, call
/// `classify` for each, and return every outcome except `NoResult`.
pub trait TreeVisitor {
    fn visit(&self, root: &Path, classify: &mut Classifier<'_>) -> Vec<Outcome>;
}

/// Recursive walk backed by `walkdir`
///
/// Follows symlinks and sorts entries by file name so results come out in a
/// stable order.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkDirVisitor;

impl TreeVisitor for WalkDirVisitor {
    fn visit(&self, root: &Path, classify: &mut Classifier<'_>) -> Vec<Outcome> {
        let mut outcomes = Vec::new();

        for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
            let outcome = match entry {
                Ok(entry) => {
                    let kind = if entry.file_type().is_dir() {
                        EntryKind::Directory
                    } else {
                        EntryKind::File
                    };
                    classify(entry.path(), kind)
                }
                Err(err) => walk_error(root, &err),
            };
            if !outcome.is_no_result() {
                outcomes.push(outcome);
            }
        }

        outcomes
    }
}

fn walk_error(root: &Path, err: &walkdir::Error) -> Outcome {
    let path = err.path().unwrap_or(root);
    match err.io_error() {
        Some(io) => load_failed(path, io).into(),
        // Symlink loops
        None => DiscoveryWarning::UnableToLoad {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
        .into(),
    }
}

/// Single-level scan of `<root>/ebin/*.app` and `<root>/*/ebin/*.app`
pub fn shallow_scan(root: &Path, classify: &mut Classifier<'_>) -> Vec<Outcome> {
    let mut outcomes = Vec::new();
    let mut artifact_dirs = vec![root.join(ARTIFACT_DIR)];

    match sorted_entries(root) {
        Ok(children) => artifact_dirs.extend(
            children
                .into_iter()
                .filter(|child| child.is_dir())
                .map(|child| child.join(ARTIFACT_DIR)),
        ),
        Err(err) => outcomes.push(load_failed(root, &err).into()),
    }

    for ebin in artifact_dirs.iter().filter(|dir| dir.is_dir()) {
        let files = match sorted_entries(ebin) {
            Ok(files) => files,
            Err(err) => {
                outcomes.push(load_failed(ebin, &err).into());
                continue;
            }
        };
        for file in files.iter().filter(|f| f.is_file()) {
            let outcome = classify(file.as_path(), EntryKind::File);
            if !outcome.is_no_result() {
                outcomes.push(outcome);
            }
        }
    }

    outcomes
}

fn sorted_entries(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut paths = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();
    Ok(paths)
}
