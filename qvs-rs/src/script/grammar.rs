//! Statement grammar registry.
//!
//! Each statement form (`SET`/`LET` today; `FOR`/`NEXT`, `IF`/`THEN`,
//! `DO`/`LOOP`, `SUB`/`CALL`, `SWITCH`/`CASE` and data-source statements
//! later) is a [`StatementMatcher`] value held in an ordered [`Registry`].
//! Matchers are immutable; all mutable run state lives in [`ExecState`].
//!
//! Dispatch asks every matcher whether it [claims](StatementMatcher::claims)
//! the statement.  Exactly one claimant executes it.  Two or more claimants
//! mean the grammar overlaps, and the statement is reported instead of
//! letting the first one win.

use std::fmt;

use super::assign::AssignmentMatcher;
use super::diag::DiagnosticKind;
use crate::var::VarStore;

// ── Execution state ───────────────────────────────────────────────────────────

/// Mutable state threaded through matchers during a run.
pub struct ExecState<'v> {
    pub vars: &'v mut VarStore,
    pc: usize,
}

impl<'v> ExecState<'v> {
    pub fn new(vars: &'v mut VarStore) -> Self {
        ExecState { vars, pc: 0 }
    }

    /// Index of the statement being executed.
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Move to the next statement.  A matcher calls this exactly once when it
    /// executes a statement.
    pub fn advance(&mut self) {
        self.pc += 1;
    }

    pub(crate) fn set_pc(&mut self, pc: usize) {
        self.pc = pc;
    }
}

// ── Matcher seam ──────────────────────────────────────────────────────────────

/// Result of [`StatementMatcher::try_execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The statement was executed and the program counter advanced.
    Matched,
    /// The statement has this form's keyword but not its shape.
    Rejected { kind: DiagnosticKind, reason: String },
}

impl Outcome {
    pub fn matched(&self) -> bool {
        matches!(self, Outcome::Matched)
    }
}

/// One statement form.
pub trait StatementMatcher: fmt::Debug {
    /// Short name used in diagnostics and logs (e.g. `"SET/LET"`).
    fn name(&self) -> &'static str;

    /// `true` if `text` is introduced by this form's keyword.
    fn claims(&self, text: &str) -> bool;

    /// Recognise the full shape of `text` and execute it.
    ///
    /// On success the matcher mutates `state` and calls
    /// [`ExecState::advance`] exactly once.  On rejection it must leave
    /// `state` untouched.
    fn try_execute(&self, text: &str, state: &mut ExecState<'_>) -> Outcome;
}

// ── Registry ──────────────────────────────────────────────────────────────────

/// What happened to a statement offered to the [`Registry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Matched { matcher: &'static str },
    Unmatched { kind: DiagnosticKind, reason: String },
}

/// Ordered set of statement forms.
#[derive(Debug, Default)]
pub struct Registry {
    matchers: Vec<Box<dyn StatementMatcher>>,
}

impl Registry {
    /// A registry with no forms; every non-blank statement is unmatched.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in forms, in dispatch order.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(AssignmentMatcher::new());
        registry
    }

    /// Append a form.  Forms are consulted in registration order.
    pub fn register(&mut self, matcher: impl StatementMatcher + 'static) {
        self.matchers.push(Box::new(matcher));
    }

    /// Names of the registered forms, in order.
    pub fn names(&self) -> Vec<&'static str> {
        self.matchers.iter().map(|m| m.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Offer `text` to the registered forms.
    pub fn dispatch(&self, text: &str, state: &mut ExecState<'_>) -> Dispatch {
        let mut claimants = self.matchers.iter().filter(|m| m.claims(text));
        let Some(first) = claimants.next() else {
            return Dispatch::Unmatched {
                kind: DiagnosticKind::UnmatchedStatement,
                reason: "no statement form recognises this text".to_owned(),
            };
        };
        let others: Vec<&'static str> = claimants.map(|m| m.name()).collect();
        if !others.is_empty() {
            return Dispatch::Unmatched {
                kind: DiagnosticKind::AmbiguousMatch,
                reason: format!("claimed by {} and {}", first.name(), others.join(", ")),
            };
        }
        match first.try_execute(text, state) {
            Outcome::Matched => Dispatch::Matched { matcher: first.name() },
            Outcome::Rejected { kind, reason } => Dispatch::Unmatched { kind, reason },
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
