// src/errors.rs

//! Crate-wide error type.
//!
//! Every variant eventually surfaces to the caller as a failed
//! [`RunOutcome`](crate::exec::RunOutcome) with exit code 1; the original
//! process exit code is only kept here for logging.

use thiserror::Error;

/// Exit code reported for every kind of failure.
pub const FAILURE_EXIT_CODE: i32 = 1;

#[derive(Error, Debug)]
pub enum TestrigError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to launch {program}: {reason}")]
    Launch { program: String, reason: String },

    #[error("Tests did not complete successfully")]
    RunFailure { code: Option<i32> },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TestrigError {
    /// Exit code the caller should report for this error.
    ///
    /// Always 1, regardless of the code the runner exited with.
    pub fn exit_code(&self) -> i32 {
        FAILURE_EXIT_CODE
    }
}

pub type Result<T> = std::result::Result<T, TestrigError>;
