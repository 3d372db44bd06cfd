// src/lib.rs

pub mod args;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod project;
pub mod sink;

use std::path::Path;

use anyhow::Result;
use tracing::{debug, error};

use crate::args::{ArgumentVector, build_arguments};
use crate::cli::CliArgs;
use crate::config::{TestRunConfig, load_settings};
use crate::exec::{RunOutcome, RunnerCommand, Supervisor, WatchCommand};
use crate::project::ProjectContext;
use crate::sink::{LogSink, SharedSink, default_sink};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - settings file + CLI flags into a `TestRunConfig`
/// - project discovery
/// - argument building
/// - the supervised run
pub async fn run(args: CliArgs) -> Result<RunOutcome> {
    let cwd = std::env::current_dir()?;
    Ok(run_in(args, &cwd, default_sink()).await)
}

/// Same as [`run`], with an explicit working directory and sink.
///
/// Every failure, including configuration errors, comes back as a
/// `RunOutcome::Failure`.
pub async fn run_in(args: CliArgs, working_dir: &Path, sink: SharedSink) -> RunOutcome {
    let (config, argv) = match prepare(&args, working_dir) {
        Ok(prepared) => prepared,
        Err(err) => {
            error!(error = %err, "could not prepare test run");
            sink.log(&err.to_string());
            return RunOutcome::from_error(&err);
        }
    };

    if args.dry_run {
        print_dry_run(&config, &argv, sink.as_ref());
        return RunOutcome::Success;
    }

    supervisor_for(&args, working_dir, sink)
        .run(&config, &argv)
        .await
}

/// Supervisor whose processes start in `working_dir`, where the argument
/// paths were resolved.
fn supervisor_for(args: &CliArgs, working_dir: &Path, sink: SharedSink) -> Supervisor {
    let runner = RunnerCommand::new(&args.runner);
    let watcher = WatchCommand::default().with_program(&args.watcher);
    Supervisor::new(runner, sink)
        .with_watcher(watcher)
        .with_working_dir(working_dir)
}

fn prepare(
    args: &CliArgs,
    working_dir: &Path,
) -> errors::Result<(TestRunConfig, ArgumentVector)> {
    let settings = load_settings(args.settings.as_deref(), working_dir)?;
    let config = args.apply_to(settings);
    let ctx = ProjectContext::discover(working_dir)?;
    debug!(?ctx, "project context");

    let argv = build_arguments(&config, &ctx)?;
    Ok((config, argv))
}

/// Dry-run output: the resolved config flags and the argument list.
fn print_dry_run(config: &TestRunConfig, argv: &ArgumentVector, sink: &dyn LogSink) {
    sink.log("testrig dry-run");
    sink.log(&format!(
        "  suites: node_unit={} remote_unit={} remote_functional={}",
        config.node_unit, config.remote_unit, config.remote_functional
    ));
    if let Some(plugins) = &config.loader_plugins {
        sink.log(&format!("  loader plugins: {}", plugins.join(", ")));
    }
    sink.log(&format!("arguments ({}):", argv.len()));
    for arg in argv {
        sink.log(&format!("  {arg}"));
    }

    debug!("dry-run complete (no execution)");
}
