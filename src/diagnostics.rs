//! Diagnostic sink for failed condition checks.
//!
//! The autoscheduler reports every failed condition as one free-text line.
//! The sink is passed in by the caller and lives for one run; nothing it
//! records feeds back into scheduling decisions.

use tracing::debug;

/// Append-only receiver of diagnostic lines.
pub trait DiagnosticSink {
    /// Records one line.
    fn record(&mut self, line: String);
}

/// In-memory diagnostic log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticLog {
    lines: Vec<String>,
}

impl DiagnosticLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded lines, oldest first.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of recorded lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// All lines joined by newlines.
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

impl DiagnosticSink for DiagnosticLog {
    fn record(&mut self, line: String) {
        debug!(target: "u_timetable::diagnostics", "{line}");
        self.lines.push(line);
    }
}

/// Sink that drops every line.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn record(&mut self, _line: String) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_accumulates_in_order() {
        let mut log = DiagnosticLog::new();
        log.record("first".into());
        log.record("second".into());
        assert_eq!(log.len(), 2);
        assert_eq!(log.render(), "first\nsecond");
    }

    #[test]
    fn test_null_sink() {
        let mut sink = NullSink;
        sink.record("ignored".into());
    }
}
