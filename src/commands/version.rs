//! Version command implementation

use crate::descriptor::{ARTIFACT_DIR, ARTIFACT_EXTENSION, DESCRIPTOR_EXTENSION};
use crate::error::Result;

/// Run version command
pub fn run() -> Result<()> {
    print!("{}", version_text());
    Ok(())
}

fn version_text() -> String {
    format!(
        "relasm {}\n\nBuild info:\n  Rust version: {}\n  Profile: {}\n  Descriptors: {ARTIFACT_DIR}/*.{DESCRIPTOR_EXTENSION}, modules: *.{ARTIFACT_EXTENSION}\n",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_RUST_VERSION"),
        build_profile()
    )
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}
