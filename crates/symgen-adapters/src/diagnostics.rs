//! Diagnostics sinks.

use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use symgen_core::application::ports::Diagnostics;

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn notice(&self, message: &str) {
        info!("{message}");
    }

    fn warning(&self, message: &str) {
        warn!("{message}");
    }
}

/// A collected diagnostic line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    Notice(String),
    Warning(String),
}

/// Keeps every line in memory. Cloning shares the buffer.
#[derive(Debug, Clone, Default)]
pub struct CollectingDiagnostics {
    lines: Arc<Mutex<Vec<Diagnostic>>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<Diagnostic> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter_map(|line| match line {
                Diagnostic::Warning(message) => Some(message),
                Diagnostic::Notice(_) => None,
            })
            .collect()
    }

    fn push(&self, line: Diagnostic) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line);
        }
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn notice(&self, message: &str) {
        self.push(Diagnostic::Notice(message.to_string()));
    }

    fn warning(&self, message: &str) {
        self.push(Diagnostic::Warning(message.to_string()));
    }
}
