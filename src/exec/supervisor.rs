// src/exec/supervisor.rs

//! Launch the runner (directly or under the watch supervisor) and turn its
//! exit into a [`RunOutcome`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::args::ArgumentVector;
use crate::config::TestRunConfig;
use crate::errors::TestrigError;
use crate::exec::command::{RunnerCommand, WatchCommand};
use crate::exec::outcome::{RunOutcome, RunState};
use crate::sink::{LogSink, SharedSink, default_sink};

pub const SUCCESS_MESSAGE: &str = "Tests completed successfully";

/// Owns the process-level side of a test run.
///
/// Each call to [`Supervisor::run`] spawns exactly one process and resolves
/// exactly one outcome. There is no retry and no timeout: a hung runner
/// hangs the caller.
pub struct Supervisor {
    runner: RunnerCommand,
    watcher: WatchCommand,
    sink: SharedSink,
    working_dir: Option<PathBuf>,
}

impl std::fmt::Debug for Supervisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Supervisor")
            .field("runner", &self.runner)
            .field("watcher", &self.watcher)
            .field("working_dir", &self.working_dir)
            .finish_non_exhaustive()
    }
}

impl Supervisor {
    pub fn new(runner: RunnerCommand, sink: SharedSink) -> Self {
        Self {
            runner,
            watcher: WatchCommand::default(),
            sink,
            working_dir: None,
        }
    }

    pub fn with_watcher(mut self, watcher: WatchCommand) -> Self {
        self.watcher = watcher;
        self
    }

    /// Replace the sink. The previous one is dropped, not restored later.
    pub fn set_logger(&mut self, sink: SharedSink) {
        self.sink = sink;
    }

    /// Directory the runner, watcher and `showConfig` processes start in.
    ///
    /// The generated arguments hold paths relative to it. Without one the
    /// processes inherit this process's current directory.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    /// Run the tests once (or, in watch mode, for as long as the watch
    /// supervisor lives).
    pub async fn run(&self, config: &TestRunConfig, argv: &ArgumentVector) -> RunOutcome {
        let argv = argv.as_slice();
        let mut state = Tracker::default();

        if config.verbose {
            self.show_config(argv).await;
            self.sink.log(&format!("arguments: {}", argv.join(" ")));
        }

        state.advance(RunState::Launching);
        let (mut cmd, program, cmdline) = if config.watch {
            (
                self.watcher.command(&self.runner, argv),
                self.watcher.program.as_str(),
                self.watcher.display(&self.runner, argv),
            )
        } else {
            (
                self.runner.command(argv),
                self.runner.program.as_str(),
                self.runner.display(argv),
            )
        };
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        info!(watch = config.watch, cmd = %cmdline, "launching test runner");

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(err) => {
                state.advance(RunState::Failed);
                let launch = TestrigError::Launch {
                    program: program.to_string(),
                    reason: err.to_string(),
                };
                error!(error = %launch, "failed to launch test runner");
                self.sink.log(&launch.to_string());
                return RunOutcome::failure(err.to_string());
            }
        };
        state.advance(RunState::Running);

        let status = match child.wait().await {
            Ok(status) => status,
            Err(err) => {
                state.advance(RunState::Failed);
                error!(error = %err, "failed waiting for test runner");
                self.sink.log(&format!("Failed waiting for {program}: {err}"));
                return RunOutcome::failure(err.to_string());
            }
        };

        if status.success() {
            state.advance(RunState::Succeeded);
            info!("test runner exited successfully");
            self.sink.log(SUCCESS_MESSAGE);
            RunOutcome::Success
        } else {
            state.advance(RunState::Failed);
            let failure = TestrigError::RunFailure {
                code: status.code(),
            };
            warn!(exit_code = ?status.code(), "test runner failed");
            self.sink.log(&failure.to_string());
            RunOutcome::from_error(&failure)
        }
    }

    /// Print the runner's resolved config. Best effort: failures are logged
    /// and otherwise ignored.
    async fn show_config(&self, argv: &[String]) {
        debug!("requesting resolved runner config");
        let config_arg = argv.iter().find(|a| a.starts_with("config=")).map(String::as_str);
        let mut cmd = self.runner.show_config_command(config_arg);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        let output = match cmd.output().await {
            Ok(output) => output,
            Err(err) => {
                warn!(error = %err, "showConfig could not be run");
                self.sink.log(&format!("Unable to show config: {err}"));
                return;
            }
        };

        for stream in [&output.stdout, &output.stderr] {
            let text = String::from_utf8_lossy(stream);
            if !text.trim().is_empty() {
                self.sink.log(text.trim_end());
            }
        }

        if !output.status.success() {
            warn!(exit_code = ?output.status.code(), "showConfig exited with an error");
            self.sink
                .log(&format!("Unable to show config: runner exited with {}", output.status));
        }
    }
}

impl Default for Supervisor {
    fn default() -> Self {
        Self::new(RunnerCommand::default(), default_sink())
    }
}

/// Keeps the current [`RunState`] and logs each transition.
#[derive(Debug)]
struct Tracker {
    state: RunState,
}

impl Default for Tracker {
    fn default() -> Self {
        Self {
            state: RunState::Idle,
        }
    }
}

impl Tracker {
    fn advance(&mut self, next: RunState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid run state transition {:?} -> {:?}",
            self.state,
            next
        );
        debug!(from = ?self.state, to = ?next, "run state");
        self.state = next;
    }
}

/// Shorthand for a supervisor writing to `sink`.
pub fn supervisor_with_sink(runner: RunnerCommand, sink: impl LogSink + 'static) -> Supervisor {
    Supervisor::new(runner, Arc::new(sink))
}
