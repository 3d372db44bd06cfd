// src/sink.rs

//! Destination for user-visible status text.
//!
//! Everything the supervisor wants a person to read (success/failure
//! banners, verbose diagnostics) goes through a [`LogSink`] instead of being
//! printed directly, so callers can redirect or silence it. Internal
//! diagnostics still go through `tracing`.

use std::fmt;
use std::io::Write;
use std::sync::{Arc, Mutex};

/// A message consumer.
pub trait LogSink: Send + Sync {
    fn log(&self, message: &str);
}

/// Shared handle to a sink.
pub type SharedSink = Arc<dyn LogSink>;

/// Default sink: one line per message on stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn log(&self, message: &str) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{message}");
    }
}

/// Drops every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn log(&self, _message: &str) {}
}

/// Records messages in memory, mainly for tests.
#[derive(Clone, Default)]
pub struct MemorySink {
    messages: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far.
    pub fn messages(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.messages().iter().any(|m| m.contains(needle))
    }
}

impl LogSink for MemorySink {
    fn log(&self, message: &str) {
        let mut guard = match self.messages.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.push(message.to_string());
    }
}

impl fmt::Debug for MemorySink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemorySink")
            .field("messages", &self.messages().len())
            .finish()
    }
}

pub fn default_sink() -> SharedSink {
    Arc::new(ConsoleSink)
}
