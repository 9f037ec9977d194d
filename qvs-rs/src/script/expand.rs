//! Dollar-sign variable expansion.
//!
//! `$(name)` is replaced by the current value of `name`.  Everything else is
//! copied through unchanged:
//!
//! | Input | Output |
//! |-------|--------|
//! | `$(x)` with `x` defined | value of `x` |
//! | `$(x)` with `x` undefined | `$(x)` |
//! | `$(` with no closing `)` | copied verbatim |
//! | `$(` not followed by `name)` | `$(`, then scanning resumes |
//! | `$` not followed by `(` | `$` |
//!
//! Expansion is a single left-to-right pass.  Replacement text is never
//! scanned again, so a value containing `$(…)` cannot cause recursion.
//! Names follow the same rule as assignment targets
//! ([`is_valid_name`]).

use crate::var::is_valid_name;

/// Variable lookups needed by [`expand`].
pub trait ExpandContext {
    /// Stringified value of `name`, or `None` if it is not defined.
    fn lookup(&self, name: &str) -> Option<String>;
}

/// Expand all `$(name)` references in `src`.
pub fn expand(src: &str, ctx: &dyn ExpandContext) -> String {
    let mut out = String::with_capacity(src.len());
    let mut rest = src;

    while let Some(start) = rest.find("$(") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        let Some(close) = after_open.find(')') else {
            // No `)` anywhere further on, so no later reference can close
            // either.
            out.push_str(&rest[start..]);
            return out;
        };
        let name = &after_open[..close];
        let valid = is_valid_name(name);
        let value = if valid { ctx.lookup(name) } else { None };
        match value {
            Some(value) => {
                out.push_str(&value);
                rest = &after_open[close + 1..];
            }
            None => {
                if valid {
                    tracing::trace!(name, "undefined variable left unexpanded");
                }
                // Keep the `$(` and rescan what follows it, which may hold a
                // reference of its own (`$($(a))`, `$( and $(a)`).
                out.push_str("$(");
                rest = after_open;
            }
        }
    }
    out.push_str(rest);
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
