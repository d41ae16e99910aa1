//! Configuration file handling for relasm
//!
//! This module contains data structures for:
//! - `relasm.yaml` - Library directories, skip list and overrides for discovery

pub mod release;

// Re-export commonly used types
pub use release::{CONFIG_FILE_NAME, ReleaseConfig, load_config, normalize_path};
