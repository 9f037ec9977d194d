//! Non-fatal run diagnostics.

use std::fmt;

/// Why a statement produced a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// No statement form recognised the text, or the form that claimed it
    /// found it malformed.
    UnmatchedStatement,
    /// More than one form claimed the statement, or one form found more than
    /// one candidate inside it.
    AmbiguousMatch,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::UnmatchedStatement => write!(f, "unmatched statement"),
            DiagnosticKind::AmbiguousMatch => write!(f, "ambiguous statement"),
        }
    }
}

/// A statement the interpreter could not execute.
///
/// Diagnostics never stop a run; one is produced for each non-blank
/// statement that did not execute, in statement order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Zero-based statement index.
    pub index: usize,
    /// Statement text as segmented, before expansion.
    pub text: String,
    /// Statement text after `$(…)` expansion, as offered to the grammar.
    pub expanded: String,
    pub kind: DiagnosticKind,
    /// Human-readable reason.
    pub reason: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "statement {}: {}: {}: `{}`",
            self.index,
            self.kind,
            self.reason,
            self.text.trim()
        )
    }
}
