//! `SET` / `LET` assignment statements.
//!
//! ```text
//! [ws] SET|LET ws name ws = ws value
//! ```
//!
//! Keywords are case-insensitive.  `name` is a letter followed by letters,
//! digits, `_` or `.`; `value` runs to the end of the statement and is
//! coerced by [`Value::coerce`].  `SET` and `LET` behave identically since
//! expressions are not evaluated.

use std::sync::OnceLock;

use regex::Regex;

use super::diag::DiagnosticKind;
use super::grammar::{ExecState, Outcome, StatementMatcher};
use super::value::Value;
use crate::pattern::{compile_fixed_with, Flags};
use crate::var::NAME_PATTERN;

/// Matcher for assignment statements.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssignmentMatcher;

impl AssignmentMatcher {
    pub fn new() -> Self {
        AssignmentMatcher
    }
}

/// The introducing keyword as a whole word.
fn keyword_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        compile_fixed_with(r"^\s*(?:SET|LET)\b", Flags::NONE.case_insensitive())
    })
}

/// An assignment head up to its `=`.  Counted anywhere in a statement to
/// detect a second assignment inside the value.
fn head_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        compile_fixed_with(
            &format!(r"(?:^|\s)(?:SET|LET)\s+{NAME_PATTERN}\s+="),
            Flags::NONE.case_insensitive(),
        )
    })
}

fn statement_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        compile_fixed_with(
            &format!(r"^\s*(?:SET|LET)\s+(?P<name>{NAME_PATTERN})\s+=\s+(?P<value>.*)$"),
            Flags::NONE.case_insensitive().dot_all(),
        )
    })
}

impl StatementMatcher for AssignmentMatcher {
    fn name(&self) -> &'static str {
        "SET/LET"
    }

    fn claims(&self, text: &str) -> bool {
        keyword_re().is_match(text)
    }

    fn try_execute(&self, text: &str, state: &mut ExecState<'_>) -> Outcome {
        let heads = head_re().find_iter(text).count();
        if heads > 1 {
            return Outcome::Rejected {
                kind: DiagnosticKind::AmbiguousMatch,
                reason: format!("{heads} assignments in one statement"),
            };
        }

        let Some(caps) = statement_re().captures(text) else {
            return Outcome::Rejected {
                kind: DiagnosticKind::UnmatchedStatement,
                reason: "malformed SET/LET statement, expected `SET name = value`".to_owned(),
            };
        };
        let (Some(name), Some(raw)) = (caps.name("name"), caps.name("value")) else {
            return Outcome::Rejected {
                kind: DiagnosticKind::UnmatchedStatement,
                reason: "malformed SET/LET statement".to_owned(),
            };
        };

        let value = Value::coerce(raw.as_str());
        tracing::debug!(
            pc = state.pc(),
            name = name.as_str(),
            value = %value,
            ty = value.type_name(),
            "assign"
        );
        state.vars.set(name.as_str(), value);
        state.advance();
        Outcome::Matched
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
