//! digicase-core
//!
//! Core library for forensic case files.
//!
//! This crate defines the case record model (cases, events, evidence), the
//! versioned case file format, HTML record rendering from templates, and the
//! settings used to locate those templates.
//!
//! All substantive logic lives here so it is testable and reusable from any
//! frontend; the `digicase` CLI is one such frontend.

pub mod config;
pub mod model;
pub mod render;
pub mod store;

pub use model::{Case, Event, Evidence};

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
