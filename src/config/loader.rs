// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::TestRunConfig;
use crate::config::validate::validate_config;
use crate::errors::{Result, TestrigError};

/// Name of the project settings file looked up in the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "Testrig.toml";

/// Load a settings file and return the raw `TestRunConfig`.
///
/// This only performs TOML deserialization; it does **not** check the
/// config invariants. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<TestRunConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| {
        TestrigError::Configuration(format!("reading settings file {:?}: {e}", path))
    })?;

    let config: TestRunConfig = toml::from_str(&contents)?;
    debug!(?path, "loaded settings file");

    Ok(config)
}

/// Load a settings file and check it against the config invariants.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<TestRunConfig> {
    let config = load_from_path(&path)?;
    validate_config(&config)?;
    Ok(config)
}

/// Resolve the settings the front end should start from.
///
/// - An explicitly requested file must exist; relative paths are taken from
///   `working_dir`.
/// - Otherwise `Testrig.toml` in `working_dir` is used when present, and an
///   empty config when it is not.
///
/// No validation happens here: command-line flags may still add the
/// `childConfig` that `externals` needs.
pub fn load_settings(explicit: Option<&Path>, working_dir: &Path) -> Result<TestRunConfig> {
    match explicit {
        Some(path) => load_from_path(working_dir.join(path)),
        None => {
            let path = default_settings_path(working_dir);
            if path.is_file() {
                load_from_path(&path)
            } else {
                debug!(?path, "no settings file; using defaults");
                Ok(TestRunConfig::default())
            }
        }
    }
}

pub fn default_settings_path(working_dir: &Path) -> PathBuf {
    working_dir.join(DEFAULT_SETTINGS_FILE)
}
