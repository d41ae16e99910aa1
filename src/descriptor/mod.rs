//! Application descriptor (`ebin/<name>.app`) parsing
//!
//! A descriptor is a single term of the form
//! `{application, Name, [{Key, Value}, ...]}.` The attribute list is kept in
//! file order; lookups return the first entry for a key.

pub mod term;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use term::{ParseError, Term};

/// Directory holding compiled modules and the application descriptor
pub const ARTIFACT_DIR: &str = "ebin";

/// Extension of application descriptor files
pub const DESCRIPTOR_EXTENSION: &str = "app";

/// Extension of compiled module artifacts
pub const ARTIFACT_EXTENSION: &str = "beam";

/// Reasons a descriptor document is not a usable application descriptor
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    #[error(transparent)]
    Syntax(#[from] ParseError),

    #[error("expected {{application, Name, [Attributes]}}, found {found}")]
    UnexpectedShape { found: String },

    #[error("attribute '{key}' must be {expected}, found {found}")]
    InvalidAttribute {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// A parsed application descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct AppDescriptor {
    pub name: String,
    attributes: Vec<(String, Term)>,
}

impl AppDescriptor {
    /// Parse a descriptor document
    pub fn parse(src: &str) -> Result<Self, DescriptorError> {
        let term = term::parse_document(src)?;
        let Term::Tuple(items) = term else {
            return Err(unexpected_shape(format!("a top-level {}", term.kind())));
        };

        let [tag, name, attributes] = items.as_slice() else {
            return Err(unexpected_shape(format!(
                "a tuple with {} elements",
                items.len()
            )));
        };

        if tag.as_atom() != Some("application") {
            return Err(unexpected_shape(format!("tag {tag:?}")));
        }
        let name = name
            .as_atom()
            .ok_or_else(|| unexpected_shape(format!("an application name of type {}", name.kind())))?;
        let entries = attributes.as_list().ok_or_else(|| {
            unexpected_shape(format!("attributes of type {}", attributes.kind()))
        })?;

        let attributes = entries
            .iter()
            .map(attribute_pair)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: name.to_string(),
            attributes,
        })
    }

    /// First value for `key`, if present
    pub fn get(&self, key: &str) -> Option<&Term> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Read `key` as a list of atoms
    ///
    /// Returns `Ok(None)` when the attribute is absent.
    pub fn atom_list(&self, key: &str) -> Result<Option<Vec<String>>, DescriptorError> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        let invalid = |found| DescriptorError::InvalidAttribute {
            key: key.to_string(),
            expected: "a list of atoms",
            found,
        };

        let items = value.as_list().ok_or_else(|| invalid(value.kind()))?;
        items
            .iter()
            .map(|item| item.as_atom().map(str::to_string).ok_or_else(|| invalid(item.kind())))
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

fn attribute_pair(entry: &Term) -> Result<(String, Term), DescriptorError> {
    if let Term::Tuple(pair) = entry {
        if let [Term::Atom(key), value] = pair.as_slice() {
            return Ok((key.clone(), value.clone()));
        }
    }
    Err(unexpected_shape(format!(
        "attribute entry {entry:?}, expected {{Key, Value}}"
    )))
}

fn unexpected_shape(found: String) -> DescriptorError {
    DescriptorError::UnexpectedShape { found }
}

/// Expected descriptor location for application `name` rooted at `app_dir`
pub fn descriptor_path(app_dir: &Path, name: &str) -> PathBuf {
    app_dir
        .join(ARTIFACT_DIR)
        .join(format!("{name}.{DESCRIPTOR_EXTENSION}"))
}

/// Expected compiled artifact for `module` inside an `ebin` directory
pub fn artifact_path(ebin_dir: &Path, module: &str) -> PathBuf {
    ebin_dir.join(format!("{module}.{ARTIFACT_EXTENSION}"))
}
