// src/config/model.rs

use serde::{Deserialize, Serialize};

/// Intern config file used when none is given.
pub const DEFAULT_INTERN_CONFIG: &str = "intern.json";

/// Everything needed to invoke the test runner once.
///
/// Field names follow the camelCase keys used in `Testrig.toml`:
///
/// ```toml
/// internConfig = "intern.json"
/// childConfig = "browserstack"
/// remoteUnit = true
/// reporters = "runner,lcov"
///
/// [externals]
/// outputPath = "externals"
/// dependencies = ["jquery"]
/// ```
///
/// A config is consumed once by [`build_arguments`](crate::args::build_arguments)
/// and then by the supervisor; nothing keeps it around between runs.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TestRunConfig {
    /// Run unit tests in a local Node process.
    #[serde(default)]
    pub node_unit: bool,

    /// Run unit tests in remote browsers.
    #[serde(default)]
    pub remote_unit: bool,

    /// Run functional tests in remote browsers.
    #[serde(default)]
    pub remote_functional: bool,

    /// Re-run whenever sources change.
    #[serde(default)]
    pub watch: bool,

    /// Log the resolved runner config and argument list before running.
    #[serde(default)]
    pub verbose: bool,

    /// Named child configuration, e.g. `"browserstack"` or `"local"`.
    #[serde(default)]
    pub child_config: Option<String>,

    /// Base config file under `<package root>/intern/`.
    #[serde(default)]
    pub intern_config: Option<String>,

    /// Comma-separated reporter names.
    #[serde(default)]
    pub reporters: Option<String>,

    #[serde(default)]
    pub user_name: Option<String>,

    /// Accepted for parity with the remote providers' credentials; not
    /// forwarded to the runner.
    #[serde(default)]
    pub secret: Option<String>,

    #[serde(default)]
    pub testing_key: Option<String>,

    /// Only run tests whose id matches this pattern.
    #[serde(default)]
    pub filter: Option<String>,

    /// Non-module dependencies loaded through the externals loader.
    #[serde(default)]
    pub externals: Option<Externals>,

    /// Loader plugins in load order.
    #[serde(default)]
    pub loader_plugins: Option<Vec<String>>,
}

impl TestRunConfig {
    /// Effective intern config file name.
    pub fn intern_config(&self) -> &str {
        self.intern_config
            .as_deref()
            .unwrap_or(DEFAULT_INTERN_CONFIG)
    }

    /// Whether any test suite was requested at all.
    pub fn runs_any_suite(&self) -> bool {
        self.node_unit || self.remote_unit || self.remote_functional
    }

    /// Overlay `other` on top of `self`.
    ///
    /// Flags are OR'ed; optional values in `other` replace those in `self`.
    /// Used to apply command-line flags over the settings file.
    pub fn merged_with(mut self, other: TestRunConfig) -> TestRunConfig {
        self.node_unit |= other.node_unit;
        self.remote_unit |= other.remote_unit;
        self.remote_functional |= other.remote_functional;
        self.watch |= other.watch;
        self.verbose |= other.verbose;

        overlay(&mut self.child_config, other.child_config);
        overlay(&mut self.intern_config, other.intern_config);
        overlay(&mut self.reporters, other.reporters);
        overlay(&mut self.user_name, other.user_name);
        overlay(&mut self.secret, other.secret);
        overlay(&mut self.testing_key, other.testing_key);
        overlay(&mut self.filter, other.filter);
        overlay(&mut self.externals, other.externals);
        overlay(&mut self.loader_plugins, other.loader_plugins);
        self
    }
}

fn overlay<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

/// `[externals]` section.
///
/// Serialized verbatim as the `options` of the externals loader, so the
/// field names here are the ones the loader script reads.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Externals {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,

    #[serde(default)]
    pub dependencies: Vec<ExternalDependency>,
}

/// One external dependency: either a bare package name or a full record.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ExternalDependency {
    Name(String),
    Record(ExternalRecord),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ExternalRecord {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Source path, relative to the project.
    pub from: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inject: Option<Inject>,
}

/// What to inject into the page for an external dependency.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Inject {
    Flag(bool),
    Path(String),
    Paths(Vec<String>),
}
