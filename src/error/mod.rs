//! Error types and handling for relasm
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`discovery`]: Per-application warnings and errors raised while scanning
//! - [`config`]: Configuration errors
//! - [`fs`]: File system errors

pub mod config;
pub mod discovery;
pub mod fs;

pub use discovery::{DiscoveryError, DiscoveryWarning, format_errors};

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for relasm operations
#[derive(Error, Diagnostic, Debug)]
pub enum RelasmError {
    // Discovery errors
    #[error("Application discovery failed with {} error(s):\n{}", .errors.len(), format_errors(.errors))]
    #[diagnostic(
        code(relasm::discovery::failed),
        help("Fix every listed application and run discovery again")
    )]
    DiscoveryFailed {
        #[related]
        errors: Vec<DiscoveryError>,
    },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(relasm::config::not_found),
        help("Pass an existing file with --config or unset RELASM_CONFIG")
    )]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(relasm::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(relasm::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Failed to read configuration file: {path}: {reason}")]
    #[diagnostic(code(relasm::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    // File system errors
    #[error("IO error: {message}")]
    #[diagnostic(code(relasm::fs::io_error))]
    IoError { message: String },

    // CLI errors
    #[error("Unknown shell: {shell}")]
    #[diagnostic(
        code(relasm::cli::unknown_shell),
        help("Supported shells: bash, elvish, fish, powershell, zsh")
    )]
    UnknownShell { shell: String },

    // Output errors
    #[error("Failed to serialize output: {message}")]
    #[diagnostic(code(relasm::output::serialize_failed))]
    SerializeFailed { message: String },
}

impl From<std::io::Error> for RelasmError {
    fn from(err: std::io::Error) -> Self {
        RelasmError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for RelasmError {
    fn from(err: serde_yaml::Error) -> Self {
        RelasmError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for RelasmError {
    fn from(err: serde_json::Error) -> Self {
        RelasmError::SerializeFailed {
            message: err.to_string(),
        }
    }
}

impl From<Vec<DiscoveryError>> for RelasmError {
    fn from(errors: Vec<DiscoveryError>) -> Self {
        RelasmError::DiscoveryFailed { errors }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, RelasmError>;
