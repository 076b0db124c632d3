use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::span::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A problem found in source text, carried as plain data.
///
/// Malformed input never aborts tree construction: the parser records a
/// diagnostic against the nearest token or node, recovers, and keeps going,
/// so tooling can still work with the rest of the tree. Trees and IR nodes
/// only aggregate these values; they never interpret them.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{severity}: {message} at {span}")]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self { severity: Severity::Error, message: message.into(), span }
    }

    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self { severity: Severity::Warning, message: message.into(), span }
    }
}

/// Render a diagnostic against its host source with ariadne.
///
/// Spans are absolute host-text offsets, so the report lines up with the
/// original document even when the diagnostic came from an embedded
/// language buried inside a string literal.
pub fn render(source: &str, diagnostic: &Diagnostic) -> String {
    use ariadne::{Label, Report, ReportKind, Source};

    let kind = match diagnostic.severity {
        Severity::Error => ReportKind::Error,
        Severity::Warning => ReportKind::Warning,
    };

    let mut out = Vec::new();
    Report::build(kind, (), diagnostic.span.start)
        .with_message(&diagnostic.message)
        .with_label(Label::new(diagnostic.span.start..diagnostic.span.end))
        .finish()
        .write(Source::from(source), &mut out)
        .expect("writing to a Vec cannot fail");
    String::from_utf8_lossy(&out).into_owned()
}
