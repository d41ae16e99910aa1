//! Domain models for relasm
//!
//! This module contains pure domain objects representing core business entities.
//! These types are free of filesystem access and carry their own invariants.

pub mod application;

pub use application::ApplicationRecord;
