// src/args/reporters.rs

//! Reporter registry.
//!
//! Maps a reporter name to the output paths it writes to. Names the registry
//! does not know are dropped by the caller, so a superset of reporter names
//! can be passed around between environments.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde_json::{Map, Value};
use tracing::debug;

use crate::errors::Result;

/// How a reporter is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReporterSpec {
    /// Passed by name only, no options object.
    Bare(&'static str),

    /// Writes into a directory, optionally under a fixed file name.
    Directory {
        directory: &'static str,
        filename: Option<&'static str>,
    },

    /// Writes a single file at a fixed path.
    File { filename: &'static str },
}

/// Look up a reporter by name, ignoring case.
pub fn lookup(name: &str) -> Option<ReporterSpec> {
    let spec = match name.trim().to_lowercase().as_str() {
        "benchmark" => ReporterSpec::Directory {
            directory: "output/coverage/benchmark",
            filename: Some("coverage.xml"),
        },
        "cobertura" => ReporterSpec::Directory {
            directory: "output/coverage/cobertura",
            filename: Some("coverage.xml"),
        },
        "htmlcoverage" => ReporterSpec::Directory {
            directory: "output/coverage/html",
            filename: None,
        },
        "jsoncoverage" => ReporterSpec::Directory {
            directory: "output/coverage/json",
            filename: None,
        },
        "junit" => ReporterSpec::File {
            filename: "output/junit/coverage.xml",
        },
        "lcov" => ReporterSpec::Directory {
            directory: "output/coverage/lcov",
            filename: Some("lcov.info"),
        },
        "pretty" => ReporterSpec::Bare("pretty"),
        "runner" => ReporterSpec::Bare("runner"),
        "simple" => ReporterSpec::Bare("simple"),
        "teamcity" => ReporterSpec::Bare("teamcity"),
        _ => return None,
    };
    Some(spec)
}

impl ReporterSpec {
    pub fn is_bare(&self) -> bool {
        matches!(self, ReporterSpec::Bare(_))
    }

    /// Directory that must exist before the runner starts, if any.
    pub fn output_dir(&self) -> Option<&'static Path> {
        match self {
            ReporterSpec::Bare(_) => None,
            ReporterSpec::Directory { directory, .. } => Some(Path::new(*directory)),
            ReporterSpec::File { filename } => Path::new(*filename)
                .parent()
                .filter(|p| !p.as_os_str().is_empty()),
        }
    }

    /// Create the output directory under `base`.
    ///
    /// Idempotent: an existing directory is left alone.
    pub fn ensure_output_dir(&self, base: &Path) -> Result<()> {
        if let Some(dir) = self.output_dir() {
            let full = base.join(dir);
            fs::create_dir_all(&full).with_context(|| format!("creating dir {:?}", full))?;
            debug!(dir = ?full, "reporter output directory ready");
        }
        Ok(())
    }

    /// Options object passed to the reporter, `None` for bare reporters.
    pub fn options(&self) -> Option<Value> {
        let mut options = Map::new();
        match self {
            ReporterSpec::Bare(_) => return None,
            ReporterSpec::Directory {
                directory,
                filename,
            } => {
                options.insert("directory".to_string(), Value::from(*directory));
                if let Some(filename) = filename {
                    options.insert("filename".to_string(), Value::from(*filename));
                }
            }
            ReporterSpec::File { filename } => {
                options.insert("filename".to_string(), Value::from(*filename));
            }
        }
        Some(Value::Object(options))
    }
}
