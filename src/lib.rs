//! relasm - release assembler
//!
//! Discovers OTP applications in library directories, validates that each is
//! compiled and versioned, applies overrides and a skip list, and returns the
//! resulting application records or every error found.
//!
//! ```no_run
//! use relasm::discovery::{DiscoveryOptions, discover};
//!
//! let options = DiscoveryOptions {
//!     lib_dirs: vec!["_build/default/lib".into()],
//!     ..DiscoveryOptions::default()
//! };
//! match discover(&options) {
//!     Ok(apps) => apps.iter().for_each(|a| println!("{}", a.versioned_name())),
//!     Err(errors) => eprintln!("{}", relasm::error::format_errors(&errors)),
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod descriptor;
pub mod discovery;
pub mod domain;
pub mod error;
pub mod logging;
pub mod ui;

#[cfg(test)]
mod test_fixtures;
