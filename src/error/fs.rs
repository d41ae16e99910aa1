//! File system errors

use super::RelasmError;

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> RelasmError {
    RelasmError::IoError {
        message: message.into(),
    }
}

/// Creates an IO error for a failed current directory lookup
pub fn current_dir_failed(err: &std::io::Error) -> RelasmError {
    io_error(format!("Failed to get current directory: {err}"))
}
