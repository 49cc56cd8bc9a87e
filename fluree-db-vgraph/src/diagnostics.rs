//! Compile diagnostics
//!
//! The compiler never aborts on a malformed statement. It reports what went
//! wrong to a [`DiagnosticSink`] and drops only the affected construct.

use std::fmt;

use serde::Serialize;
use tracing::{error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Severity {
    /// Optional construct ignored
    Warning,
    /// One statement could not be built and was skipped
    Error,
    /// A bridge violates a consistency precondition and was dropped
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// Display form of the mapping node the message is about
    pub context: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            context: context.into(),
        }
    }

    pub fn warning(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message, context)
    }

    pub fn error(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::new(Severity::Error, message, context)
    }

    pub fn fatal(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::new(Severity::Fatal, message, context)
    }

    /// Emit as a tracing event at the matching level
    pub(crate) fn trace(&self) {
        match self.severity {
            Severity::Warning => warn!(context = %self.context, "{}", self.message),
            Severity::Error | Severity::Fatal => {
                error!(severity = %self.severity, context = %self.context, "{}", self.message)
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.severity, self.message, self.context)
    }
}

pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Sink that keeps every diagnostic in report order
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    fn with_severity(&self, severity: Severity) -> Vec<&Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity == severity)
            .collect()
    }

    pub fn warnings(&self) -> Vec<&Diagnostic> {
        self.with_severity(Severity::Warning)
    }

    pub fn errors(&self) -> Vec<&Diagnostic> {
        self.with_severity(Severity::Error)
    }

    pub fn fatals(&self) -> Vec<&Diagnostic> {
        self.with_severity(Severity::Fatal)
    }

    /// Any error or fatal diagnostic
    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|d| d.severity >= Severity::Error)
    }
}

impl DiagnosticSink for Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_by_severity() {
        let mut sink = Diagnostics::new();
        assert!(!sink.has_errors());

        sink.report(Diagnostic::warning("Ignoring multiple d2rq:uriPattern", "ex:cm"));
        assert!(!sink.has_errors());
        sink.report(Diagnostic::fatal("Column t.x has no declared type", "ex:pb"));

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.warnings().len(), 1);
        assert!(sink.errors().is_empty());
        assert_eq!(sink.fatals()[0].context, "ex:pb");
        assert!(sink.has_errors());
    }

    #[test]
    fn test_display() {
        let d = Diagnostic::error("Missing d2rq:property", "ex:pb");
        assert_eq!(d.to_string(), "error: Missing d2rq:property (ex:pb)");
    }
}
