// src/args/mod.rs

//! Translation of a [`TestRunConfig`](crate::config::TestRunConfig) into the
//! runner's argument list.
//!
//! - [`reporters`] is the reporter registry.
//! - [`capabilities`] builds the JSON values for remote sessions.
//! - [`builder`] assembles the ordered [`ArgumentVector`].

pub mod builder;
pub mod capabilities;
pub mod reporters;

pub use builder::{ArgumentVector, build_arguments};
pub use reporters::{ReporterSpec, lookup};
