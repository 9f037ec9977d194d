//! Runtime value type for script variables.
//!
//! Every variable holds one of three shapes.  The shape is fixed when the
//! variable is assigned ([`Value::coerce`]); reads never convert.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::pattern::compile_fixed;

/// A script runtime value.
///
/// Serializes untagged: numbers as JSON numbers, strings as JSON strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
}

impl Default for Value {
    fn default() -> Self {
        Value::Str(String::new())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => {
                // Finite integral floats keep one fractional digit so that a
                // value written back through `$(name)` re-coerces to a float.
                if x.is_finite() && x.fract() == 0.0 {
                    write!(f, "{:.1}", x)
                } else {
                    write!(f, "{x}")
                }
            }
            Value::Str(s) => write!(f, "{s}"),
        }
    }
}

impl Value {
    /// Coerce the captured value span of an assignment.
    ///
    /// Tried in order on the trimmed text:
    ///
    /// 1. digits only → [`Value::Int`] (falls back to a float when the
    ///    digits overflow `i64`)
    /// 2. digits with a decimal point (`5.5`, `.5`, `5.`) → [`Value::Float`]
    /// 3. legacy quoting `^['"][^'"]*[':]$` → the text between the first and
    ///    last character
    /// 4. anything else → the trimmed text
    ///
    /// An unclosed quote (`'abc`) is not an error; it falls through to rule 4.
    pub fn coerce(raw: &str) -> Value {
        let text = raw.trim();
        if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            return match text.parse::<i64>() {
                Ok(n) => Value::Int(n),
                Err(_) => text
                    .parse()
                    .map(Value::Float)
                    .unwrap_or_else(|_| Value::Str(text.to_owned())),
            };
        }
        if is_decimal_form(text) {
            if let Ok(x) = text.parse::<f64>() {
                return Value::Float(x);
            }
        }
        if quoted_re().is_match(text) {
            // Both delimiters are single-byte ASCII, so byte slicing is safe.
            return Value::Str(text[1..text.len() - 1].to_owned());
        }
        Value::Str(text.to_owned())
    }

    /// Name of the type, as shown in JSON output.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
        }
    }
}

/// `true` for a run of ASCII digits containing exactly one `.` and at least
/// one digit.
fn is_decimal_form(text: &str) -> bool {
    let mut dots = 0;
    let mut digits = 0;
    for b in text.bytes() {
        match b {
            b'.' => dots += 1,
            b'0'..=b'9' => digits += 1,
            _ => return false,
        }
    }
    dots == 1 && digits > 0
}

fn quoted_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| compile_fixed(r#"^['"][^'"]*[':]$"#))
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
