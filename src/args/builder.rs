// src/args/builder.rs

use std::fmt;

use serde_json::{Value, json};
use tracing::debug;

use crate::args::capabilities::{capabilities, tunnel_options};
use crate::args::reporters::{self, ReporterSpec};
use crate::config::{TestRunConfig, validate_config};
use crate::errors::Result;
use crate::project::ProjectContext;

/// Ordered `key=value` arguments for the runner.
///
/// The runner applies last-value-wins per key, so the order entries are
/// pushed in is part of the contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentVector(Vec<String>);

impl ArgumentVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `key=value`. An empty `value` is still emitted; it clears the
    /// runner's default for `key`.
    pub fn push(&mut self, key: &str, value: impl AsRef<str>) {
        self.0.push(format!("{key}={}", value.as_ref()));
    }

    pub fn push_json(&mut self, key: &str, value: &Value) {
        self.push(key, value.to_string());
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Values of every `key=...` entry, in order.
    pub fn values_of<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0.iter().filter_map(move |arg| {
            arg.split_once('=')
                .filter(|(k, _)| *k == key)
                .map(|(_, v)| v)
        })
    }
}

impl fmt::Display for ArgumentVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

impl<'a> IntoIterator for &'a ArgumentVector {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Translate a config into the runner's argument list.
///
/// Fails with a configuration error before touching the filesystem when the
/// config is invalid. Otherwise creates the output directories of the
/// selected reporters under the working directory.
pub fn build_arguments(config: &TestRunConfig, ctx: &ProjectContext) -> Result<ArgumentVector> {
    validate_config(config)?;

    let mut args = ArgumentVector::new();

    push_config_path(&mut args, config, ctx);

    if !config.remote_unit && !config.node_unit {
        args.push("suites", "");
    }

    if let Some(externals) = &config.externals {
        let script = ctx.relative_to_working_dir(&ctx.externals_loader_script());
        let loader = json!({ "script": script, "options": externals });
        args.push_json("loader", &loader);
    }

    if !config.remote_unit && !config.remote_functional {
        args.push("environments", "");
    } else if !config.remote_functional {
        args.push("functionalSuites", "");
    }

    if let Some(filter) = &config.filter {
        args.push("grep", filter);
    }

    if let Some(reporters) = &config.reporters {
        push_reporters(&mut args, reporters, ctx)?;
    }

    if let Some(tunnel) =
        tunnel_options(config.user_name.as_deref(), config.testing_key.as_deref())
    {
        args.push_json("tunnelOptions", &tunnel);
    }

    let caps = capabilities(&ctx.project_name, config.child_config.as_deref());
    args.push_json("capabilities", &caps);

    debug!(count = args.len(), "built runner arguments");
    Ok(args)
}

fn push_config_path(args: &mut ArgumentVector, config: &TestRunConfig, ctx: &ProjectContext) {
    let mut path = ctx.relative_to_working_dir(&ctx.intern_path(config.intern_config()));
    if let Some(child) = &config.child_config {
        path.push('@');
        path.push_str(child);
    }
    args.push("config", path);
}

/// Emit reporter arguments in the order given.
///
/// Bare reporters replace the default console reporter; when only
/// file-writing reporters are chosen, `reporters=runner` goes first so
/// console output is kept.
fn push_reporters(args: &mut ArgumentVector, list: &str, ctx: &ProjectContext) -> Result<()> {
    let mut entries = ArgumentVector::new();
    let mut has_bare = false;
    let mut has_structured = false;

    for name in list.split(',').map(str::trim) {
        let Some(spec) = reporters::lookup(name) else {
            debug!(reporter = %name, "unknown reporter; skipping");
            continue;
        };

        match spec {
            ReporterSpec::Bare(bare) => {
                entries.push("reporters", bare);
                has_bare = true;
            }
            _ => {
                spec.ensure_output_dir(&ctx.working_dir)?;
                let value = json!({ "name": name, "options": spec.options() });
                entries.push_json("reporters", &value);
                has_structured = true;
            }
        }
    }

    if has_structured && !has_bare {
        args.push("reporters", "runner");
    }
    args.0.extend(entries.into_vec());
    Ok(())
}
