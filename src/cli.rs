// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::TestRunConfig;
use crate::exec::command::{DEFAULT_RUNNER, DEFAULT_WATCHER};

/// Command-line arguments for `testrig`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "testrig",
    version,
    about = "Build the argument list for the test runner and supervise the run.",
    long_about = None
)]
pub struct CliArgs {
    /// Run unit and functional tests, locally and remotely.
    #[arg(short, long)]
    pub all: bool,

    /// Run unit tests (in Node without a child config, remotely with one).
    #[arg(short, long)]
    pub unit: bool,

    /// Run functional tests.
    #[arg(short, long)]
    pub functional: bool,

    /// Run unit tests in Node.
    #[arg(short, long)]
    pub node: bool,

    /// Child configuration to use, e.g. `local`, `browserstack`, `saucelabs`.
    #[arg(short, long, value_name = "NAME")]
    pub config: Option<String>,

    /// Base runner config file under `intern/`.
    #[arg(long, value_name = "FILE")]
    pub intern_config: Option<String>,

    /// Comma-separated list of reporters.
    #[arg(short, long, value_name = "LIST")]
    pub reporters: Option<String>,

    /// User name for the remote testing service.
    #[arg(long, value_name = "NAME")]
    pub user_name: Option<String>,

    /// Access key for the remote testing service.
    #[arg(short = 'k', long, value_name = "KEY")]
    pub testing_key: Option<String>,

    /// Secret for the remote testing service.
    #[arg(long, value_name = "SECRET")]
    pub secret: Option<String>,

    /// Only run tests whose id matches this pattern.
    #[arg(long, value_name = "PATTERN")]
    pub filter: Option<String>,

    /// Re-run tests when source files change.
    #[arg(short, long)]
    pub watch: bool,

    /// Print the resolved runner config and arguments.
    #[arg(short, long)]
    pub verbose: bool,

    /// Settings file (TOML). Default: `Testrig.toml` if present.
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Test runner executable.
    #[arg(long, value_name = "PATH", env = "TESTRIG_RUNNER", default_value = DEFAULT_RUNNER)]
    pub runner: String,

    /// Watch supervisor executable.
    #[arg(long, value_name = "PATH", env = "TESTRIG_WATCHER", default_value = DEFAULT_WATCHER)]
    pub watcher: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TESTRIG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the runner arguments, but don't run anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl CliArgs {
    /// The part of the test run config that comes from explicit flags.
    ///
    /// `--unit` is not placed here: whether unit tests run in Node or
    /// remotely depends on the child config, which may come from the
    /// settings file. See [`CliArgs::apply_to`].
    pub fn to_config(&self) -> TestRunConfig {
        TestRunConfig {
            node_unit: self.all || self.node,
            remote_unit: self.all,
            remote_functional: self.all || self.functional,
            watch: self.watch,
            verbose: self.verbose,
            child_config: self.config.clone(),
            intern_config: self.intern_config.clone(),
            reporters: self.reporters.clone(),
            user_name: self.user_name.clone(),
            secret: self.secret.clone(),
            testing_key: self.testing_key.clone(),
            filter: self.filter.clone(),
            externals: None,
            loader_plugins: None,
        }
    }

    /// Overlay the flags on `settings` and place the unit tests.
    ///
    /// Unit tests run when `--unit` is given, or when neither the flags nor
    /// the settings request any suite. They run remotely when the merged
    /// config has a child config, in Node otherwise.
    pub fn apply_to(&self, settings: TestRunConfig) -> TestRunConfig {
        let mut config = settings.merged_with(self.to_config());
        if self.unit || !config.runs_any_suite() {
            if config.child_config.is_some() {
                config.remote_unit = true;
            } else {
                config.node_unit = true;
            }
        }
        config
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
