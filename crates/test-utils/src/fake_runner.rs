use std::fs;
use std::path::{Path, PathBuf};

use testrig::exec::RunnerCommand;

/// Shell snippet standing in for the test runner.
///
/// `$0` is the log file; the real arguments start at `$1`. A `showConfig`
/// call records its arguments next to the log, prints a fixed line on each
/// output stream and succeeds. Any other call records its working directory
/// and its arguments one per line, then exits with the configured code.
const SCRIPT: &str = r#"if [ "$1" = showConfig ]; then
printf '%s\n' "$@" > "$0.show-config"
echo "resolved config: ok"
echo "resolved config: note" >&2
exit 0
fi
pwd -P > "$0.cwd"
printf '%s\n' "$@" > "$0"
exit "$TESTRIG_FAKE_EXIT""#;

/// A fake runner driven through `sh -c`, so no executable file is written.
pub struct FakeRunner {
    log: PathBuf,
    exit_code: i32,
}

impl FakeRunner {
    pub fn new(dir: &Path, exit_code: i32) -> Self {
        Self {
            log: dir.join("runner-args.log"),
            exit_code,
        }
    }

    pub fn command(&self) -> RunnerCommand {
        let script = SCRIPT.replace("$TESTRIG_FAKE_EXIT", &self.exit_code.to_string());
        RunnerCommand::new("sh").with_args([
            "-c".to_string(),
            script,
            self.log.to_string_lossy().into_owned(),
        ])
    }

    /// Arguments of the last real (non-`showConfig`) invocation.
    pub fn recorded_args(&self) -> Vec<String> {
        read_lines(&self.log)
    }

    /// Arguments of the last `showConfig` invocation, directive included.
    pub fn show_config_args(&self) -> Vec<String> {
        read_lines(&self.sibling("show-config"))
    }

    /// Working directory of the last real invocation.
    pub fn recorded_cwd(&self) -> Option<PathBuf> {
        read_lines(&self.sibling("cwd")).into_iter().next().map(PathBuf::from)
    }

    pub fn was_invoked(&self) -> bool {
        self.log.exists()
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self.log.clone().into_os_string();
        name.push(".");
        name.push(suffix);
        PathBuf::from(name)
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}
