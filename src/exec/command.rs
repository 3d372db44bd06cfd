// src/exec/command.rs

//! Concrete process invocations for the runner and the watch supervisor.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

/// Directive asking the runner to print its resolved config and exit.
pub const SHOW_CONFIG: &str = "showConfig";

pub const DEFAULT_RUNNER: &str = "intern";
pub const DEFAULT_WATCHER: &str = "watchexec";

/// The external test runner.
///
/// `args` come before the generated argument vector, e.g. a script path when
/// the runner is started through an interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl RunnerCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Full argument list after the program name.
    pub fn full_args(&self, argv: &[String]) -> Vec<String> {
        self.args.iter().chain(argv.iter()).cloned().collect()
    }

    /// Command for a real run, with stdio inherited from this process.
    pub fn command(&self, argv: &[String]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.full_args(argv));
        inherit_stdio(&mut cmd);
        cmd
    }

    /// Command that asks the runner to print its resolved config.
    ///
    /// Only the `config=` argument is forwarded after the directive. Output
    /// is captured, not inherited.
    pub fn show_config_command(&self, config_arg: Option<&str>) -> Command {
        let mut args = self.args.clone();
        args.push(SHOW_CONFIG.to_string());
        args.extend(config_arg.map(str::to_string));

        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    /// Human-readable command line, for logs only.
    pub fn display(&self, argv: &[String]) -> String {
        std::iter::once(self.program.clone())
            .chain(self.full_args(argv))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for RunnerCommand {
    fn default() -> Self {
        Self::new(DEFAULT_RUNNER)
    }
}

/// The external watch supervisor that restarts the runner on changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchCommand {
    pub program: String,
    /// File extensions that count as source changes, without the dot.
    pub extensions: Vec<String>,
    /// Directories to observe, relative to the working directory.
    pub paths: Vec<String>,
    pub debounce: Duration,
}

impl Default for WatchCommand {
    fn default() -> Self {
        Self {
            program: DEFAULT_WATCHER.to_string(),
            extensions: vec!["ts".to_string(), "tsx".to_string()],
            paths: vec!["src".to_string(), "tests/unit".to_string()],
            debounce: Duration::from_millis(1000),
        }
    }
}

impl WatchCommand {
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// `--exts <e,..> --watch <p>.. --debounce <n>ms -- <runner> <args..>`
    pub fn args(&self, runner: &RunnerCommand, argv: &[String]) -> Vec<String> {
        let mut args = Vec::new();

        if !self.extensions.is_empty() {
            args.push("--exts".to_string());
            args.push(self.extensions.join(","));
        }
        for path in &self.paths {
            args.push("--watch".to_string());
            args.push(path.clone());
        }
        args.push("--debounce".to_string());
        args.push(format!("{}ms", self.debounce.as_millis()));

        args.push("--".to_string());
        args.push(runner.program.clone());
        args.extend(runner.full_args(argv));
        args
    }

    pub fn command(&self, runner: &RunnerCommand, argv: &[String]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.args(runner, argv));
        inherit_stdio(&mut cmd);
        cmd
    }

    pub fn display(&self, runner: &RunnerCommand, argv: &[String]) -> String {
        std::iter::once(self.program.clone())
            .chain(self.args(runner, argv))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn inherit_stdio(cmd: &mut Command) {
    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
}
