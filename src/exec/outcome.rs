// src/exec/outcome.rs

use crate::errors::{FAILURE_EXIT_CODE, TestrigError};

/// Result of one supervised run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Success,
    Failure { message: String, exit_code: i32 },
}

impl RunOutcome {
    /// Failure with the normalized exit code.
    pub fn failure(message: impl Into<String>) -> Self {
        RunOutcome::Failure {
            message: message.into(),
            exit_code: FAILURE_EXIT_CODE,
        }
    }

    pub fn from_error(err: &TestrigError) -> Self {
        RunOutcome::Failure {
            message: err.to_string(),
            exit_code: err.exit_code(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Success)
    }

    /// Process exit code for the front end.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Success => 0,
            RunOutcome::Failure { exit_code, .. } => *exit_code,
        }
    }
}

/// Lifecycle of a supervised run.
///
/// `Idle -> Launching -> Running -> Succeeded | Failed`, with a direct
/// `Launching -> Failed` edge for spawn errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Launching,
    Running,
    Succeeded,
    Failed,
}

impl RunState {
    pub fn can_transition_to(self, next: RunState) -> bool {
        use RunState::*;
        matches!(
            (self, next),
            (Idle, Launching)
                | (Launching, Running)
                | (Launching, Failed)
                | (Running, Succeeded)
                | (Running, Failed)
        )
    }
}
