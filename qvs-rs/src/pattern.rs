//! Regular-expression construction for the built-in grammar patterns.
//!
//! Every pattern the interpreter uses (comment stripping, assignment shape,
//! quoted values) is a fixed string compiled once at first use.  The
//! [`Flags`] mirror the inline options the script language needs:
//!
//! | Flag | Regex option | Used by |
//! |------|--------------|---------|
//! | `case_insensitive` | `(?i)` | keywords (`SET`, `LET`, `REM`) |
//! | `multi_line` | `(?m)` | line-anchored comment rules |
//! | `dot_all` | `(?s)` | `/* … */` block comments |

use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// Error returned when a pattern cannot be compiled.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("regex error in {src:?}: {source}")]
    InvalidRegex {
        src: String,
        #[source]
        source: regex::Error,
    },
}

/// Compile options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub case_insensitive: bool,
    pub multi_line: bool,
    pub dot_all: bool,
}

impl Flags {
    pub const NONE: Flags = Flags { case_insensitive: false, multi_line: false, dot_all: false };

    pub fn case_insensitive(mut self) -> Self {
        self.case_insensitive = true;
        self
    }

    pub fn multi_line(mut self) -> Self {
        self.multi_line = true;
        self
    }

    pub fn dot_all(mut self) -> Self {
        self.dot_all = true;
        self
    }
}

/// Compile `src` with `flags`.
pub fn compile(src: &str, flags: Flags) -> Result<Regex, PatternError> {
    RegexBuilder::new(src)
        .case_insensitive(flags.case_insensitive)
        .multi_line(flags.multi_line)
        .dot_matches_new_line(flags.dot_all)
        .build()
        .map_err(|source| PatternError::InvalidRegex { src: src.to_owned(), source })
}

/// Compile a built-in pattern with no flags.
///
/// Built-in patterns are string constants covered by the unit tests, so a
/// failure here is a programming error.
pub fn compile_fixed(src: &str) -> Regex {
    compile_fixed_with(src, Flags::NONE)
}

/// Compile a built-in pattern with `flags`.  See [`compile_fixed`].
pub fn compile_fixed_with(src: &str, flags: Flags) -> Regex {
    match compile(src, flags) {
        Ok(re) => re,
        Err(e) => panic!("built-in pattern failed to compile: {e}"),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_insensitive_flag() {
        let re = compile("^let$", Flags::NONE.case_insensitive()).unwrap();
        assert!(re.is_match("LET"));
        assert!(re.is_match("Let"));
        let re = compile("^let$", Flags::NONE).unwrap();
        assert!(!re.is_match("LET"));
    }

    #[test]
    fn multi_line_flag() {
        let re = compile("^b", Flags::NONE.multi_line()).unwrap();
        assert!(re.is_match("a\nb"));
        let re = compile("^b", Flags::NONE).unwrap();
        assert!(!re.is_match("a\nb"));
    }

    #[test]
    fn dot_all_flag() {
        let re = compile("a.b", Flags::NONE.dot_all()).unwrap();
        assert!(re.is_match("a\nb"));
        let re = compile("a.b", Flags::NONE).unwrap();
        assert!(!re.is_match("a\nb"));
    }

    #[test]
    fn invalid_regex_reports_source() {
        let err = compile("(unclosed", Flags::NONE).unwrap_err();
        assert!(err.to_string().contains("(unclosed"));
    }
}
