//! Statement segmentation.
//!
//! Splits normalized text on the statement terminator.  Empty and
//! whitespace-only statements keep their slot so that statement indices stay
//! stable; text after the final terminator is not a statement and is dropped.

/// The statement terminator.
pub const TERMINATOR: char = ';';

/// One terminator-delimited unit of script text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// Zero-based position in the segmented stream.
    pub index: usize,
    /// Text between the previous terminator (or start of input) and this
    /// statement's terminator, terminator excluded.
    pub text: String,
}

impl Statement {
    /// `true` if the statement contains nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Split `normalized` into statements, in source order.
///
/// A text with `k` terminators always yields exactly `k` statements.
pub fn segment(normalized: &str) -> Vec<Statement> {
    let mut pieces: Vec<&str> = normalized.split(TERMINATOR).collect();
    // `split` yields one piece more than there are terminators; the last one
    // is the unterminated tail.
    pieces.pop();
    pieces
        .into_iter()
        .enumerate()
        .map(|(index, text)| Statement { index, text: text.to_owned() })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
