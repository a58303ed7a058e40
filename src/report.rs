//! Reporting capability handed to components instead of a global logger.
//!
//! Library code never installs or writes to a process-wide logger directly.
//! Each component that has something to say takes a `&dyn Reporter`; the
//! binary passes a [`TracingReporter`], tests and embedders can pass a
//! [`MemoryReporter`] and inspect what was said.

use std::cell::RefCell;
use tracing::Level;

/// Sink for diagnostic messages
pub trait Reporter {
    /// Record a message at the given level
    fn log(&self, level: Level, message: &str);

    fn debug(&self, message: &str) {
        self.log(Level::DEBUG, message);
    }

    fn info(&self, message: &str) {
        self.log(Level::INFO, message);
    }

    fn warn(&self, message: &str) {
        self.log(Level::WARN, message);
    }

    fn error(&self, message: &str) {
        self.log(Level::ERROR, message);
    }
}

/// Forwards messages to the `tracing` subscriber installed by [`crate::logging::init`]
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn log(&self, level: Level, message: &str) {
        match level {
            Level::ERROR => tracing::error!("{}", message),
            Level::WARN => tracing::warn!("{}", message),
            Level::INFO => tracing::info!("{}", message),
            Level::DEBUG => tracing::debug!("{}", message),
            _ => tracing::trace!("{}", message),
        }
    }
}

/// Keeps every message in memory
#[derive(Debug, Default)]
pub struct MemoryReporter {
    entries: RefCell<Vec<(Level, String)>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded messages in order
    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries.borrow().clone()
    }

    /// Whether any message at `level` contains `needle`
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|(l, m)| *l == level && m.contains(needle))
    }
}

impl Reporter for MemoryReporter {
    fn log(&self, level: Level, message: &str) {
        self.entries.borrow_mut().push((level, message.to_string()));
    }
}
