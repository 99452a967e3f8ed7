//! Diagnostic sinks receiving naming violations.

use crate::types::{Severity, Violation};
use std::sync::{Mutex, PoisonError};

/// Receives every violation found by the walker, in visitation order.
///
/// Sinks take `&self` so one sink can be shared by walks running on
/// different threads. A single call must record the whole violation.
pub trait DiagnosticSink: Send + Sync {
    /// Records one violation.
    fn report(&self, violation: Violation);
}

/// Sink that keeps violations in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    violations: Mutex<Vec<Violation>>,
}

impl CollectingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of violations recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consumes the sink and returns the recorded violations.
    #[must_use]
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, violation: Violation) {
        self.violations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(violation);
    }
}

/// Sink that emits each violation as a `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, violation: Violation) {
        let file = violation.location.file.display();
        match violation.severity {
            Severity::Warning => tracing::warn!(
                code = %violation.code,
                check = %violation.check,
                %file,
                line = violation.location.line,
                column = violation.location.column,
                "{}",
                violation.message
            ),
            Severity::Info => tracing::info!(
                code = %violation.code,
                check = %violation.check,
                %file,
                line = violation.location.line,
                column = violation.location.column,
                "{}",
                violation.message
            ),
        }
    }
}
