//! Script text normalization.
//!
//! Collapses a raw script into one physical line with every comment removed.
//! The rules run in a fixed order because each one sees the output of the
//! previous one:
//!
//! 1. `// …` line comments, unless the `//` directly follows a word character
//!    or `:` (so `lib://path` and `a//b` survive).  The character before the
//!    `//` is kept.
//! 2. `REM …` lines (keyword is case-insensitive and must be followed by a
//!    space).
//! 3. `/* … */` block comments, non-greedy, across lines.
//! 4. Line breaks and tabs become single spaces.
//!
//! Removing a comment can expose another one: `/* hdr */ REM note` leaves a
//! line-start `REM`, and `a//*x*/*y*/` leaves `a/*y*/`.  The rules therefore
//! repeat until the text stops changing, which makes [`normalize`]
//! idempotent.  Every pass that changes anything shortens the text, so the
//! repetition terminates.
//!
//! A `//` inside a quoted string is treated as a comment; the normalizer does
//! not track quotes.

use std::sync::OnceLock;

use regex::Regex;

use crate::pattern::{compile_fixed_with, Flags};

/// Normalize raw script text.
///
/// The result contains no `\r`, `\n` or `\t`, and every statement
/// terminator of the input that is not inside a comment.
pub fn normalize(src: &str) -> String {
    // Fold every line-ending style to `\n` first so the line-anchored rules
    // below behave identically for `\r\n`, `\r` and `\n` input.
    let text = src.replace("\r\n", "\n").replace('\r', "\n");

    let mut text = strip_pass(&text);
    loop {
        let next = strip_pass(&text);
        if next == text {
            return text;
        }
        text = next;
    }
}

/// One application of rules 1-4.
fn strip_pass(text: &str) -> String {
    let text = line_comment_re().replace_all(text, "${lead}");
    let text = rem_re().replace_all(&text, "");
    let text = block_comment_re().replace_all(&text, "");

    text.chars()
        .map(|c| if c == '\n' || c == '\t' { ' ' } else { c })
        .collect()
}

fn line_comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        compile_fixed_with(r"(?P<lead>^|[^:\w])//[^\n]*", Flags::NONE.multi_line())
    })
}

fn rem_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        compile_fixed_with(
            r"^[^\S\n]*REM [^\n]*",
            Flags::NONE.multi_line().case_insensitive(),
        )
    })
}

fn block_comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| compile_fixed_with(r"/\*.*?\*/", Flags::NONE.dot_all()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
