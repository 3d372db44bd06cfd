// src/config/mod.rs

//! Test run configuration.
//!
//! Responsibilities:
//! - Define the `TestRunConfig` data model (`model.rs`).
//! - Load the optional `Testrig.toml` settings file (`loader.rs`).
//! - Check config invariants before anything is spawned (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, load_settings};
pub use model::{
    ExternalDependency, ExternalRecord, Externals, Inject, TestRunConfig, DEFAULT_INTERN_CONFIG,
};
pub use validate::validate_config;
