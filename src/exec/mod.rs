// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually starting the test runner, using
//! `tokio::process::Command`, and classifying how it ended.
//!
//! - [`command`] turns an argument vector into a runner or watch-supervisor
//!   invocation.
//! - [`supervisor`] launches it, waits for it and reports a [`RunOutcome`].
//! - [`outcome`] holds the outcome and run-state types.

pub mod command;
pub mod outcome;
pub mod supervisor;

pub use command::{RunnerCommand, WatchCommand};
pub use outcome::{RunOutcome, RunState};
pub use supervisor::Supervisor;
