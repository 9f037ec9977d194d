//! Variable store.
//!
//! Names are case-sensitive.  Each entry carries a typed [`Value`] and a
//! [`VarKind`]; the `Subroutine` kind is reserved for `SUB` definitions and
//! no built-in statement produces it yet.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::pattern::compile_fixed;
use crate::script::expand::ExpandContext;
use crate::script::value::Value;

/// Regex for a variable name: a letter followed by letters, digits, `_` or
/// `.`.  Shared by the assignment grammar and [`is_valid_name`].
pub const NAME_PATTERN: &str = r"[A-Za-z][\w.]*";

/// `true` if `name` is a valid variable name (see [`NAME_PATTERN`]).
pub fn is_valid_name(name: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| compile_fixed(&format!("^(?:{NAME_PATTERN})$")))
        .is_match(name)
}

/// What a store entry represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Variable,
    Subroutine,
}

impl VarKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VarKind::Variable => "variable",
            VarKind::Subroutine => "subroutine",
        }
    }
}

/// A store entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub kind: VarKind,
    pub value: Value,
}

/// Name → typed value map.
#[derive(Debug, Default, Clone)]
pub struct VarStore {
    vars: HashMap<String, Variable>,
}

impl VarStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or overwrite) a plain variable.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.vars.insert(name.into(), Variable { kind: VarKind::Variable, value });
    }

    /// Record a subroutine entry whose value is its body text.
    pub fn define_subroutine(&mut self, name: impl Into<String>, body: impl Into<String>) {
        self.vars.insert(
            name.into(),
            Variable { kind: VarKind::Subroutine, value: Value::Str(body.into()) },
        );
    }

    /// Get the value of an entry.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name).map(|v| &v.value)
    }

    /// Get the kind of an entry.
    pub fn kind(&self, name: &str) -> Option<VarKind> {
        self.vars.get(name).map(|v| v.kind)
    }

    /// Returns `true` if the entry exists.
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Iterate over all entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Variable)> {
        self.vars.iter()
    }

    /// All entries sorted by name.
    pub fn sorted(&self) -> Vec<(&String, &Variable)> {
        let mut entries: Vec<_> = self.vars.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl ExpandContext for VarStore {
    fn lookup(&self, name: &str) -> Option<String> {
        // Subroutine bodies are not expandable values.
        match self.vars.get(name)? {
            Variable { kind: VarKind::Variable, value } => Some(value.to_string()),
            Variable { kind: VarKind::Subroutine, .. } => None,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
