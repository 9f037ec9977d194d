//! Script interpreter loop.
//!
//! The [`Interpreter`] owns the variable store and the grammar registry.
//! Running a script normalizes and segments it up front, then steps a
//! program counter over the statements:
//!
//! ```text
//! Running(pc) ──fetch──▶ blank?      ──yes──▶ pc+1 (silent)
//!                        expand $(…)
//!                        dispatch    ──matched──▶ matcher advanced pc
//!                                    ──else─────▶ Diagnostic, pc+1
//! Running(pc ≥ len) ────────────────▶ Halted
//! ```
//!
//! Every step advances the counter by exactly one, so a script of `n`
//! statements halts after `n` steps whatever the outcome of each.

use super::diag::Diagnostic;
use super::expand::expand;
use super::grammar::{Dispatch, ExecState, Registry};
use super::normalize::normalize;
use super::segment::{segment, Statement};
use super::value::Value;
use crate::var::VarStore;

// ── Steps ─────────────────────────────────────────────────────────────────────

/// Result of one [`Run::step`].
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// A statement form executed the statement.
    Executed { index: usize, matcher: &'static str },
    /// The statement was blank.
    Skipped { index: usize },
    /// No form executed the statement.
    Diagnosed(Diagnostic),
    /// The program counter is past the last statement.
    Halted,
}

/// Counts for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub statements: usize,
    pub executed: usize,
    pub skipped: usize,
    pub diagnostics: usize,
}

// ── Run ───────────────────────────────────────────────────────────────────────

/// One script in progress.  Created by [`Interpreter::start`].
pub struct Run<'i> {
    registry: &'i Registry,
    state: ExecState<'i>,
    statements: Vec<Statement>,
}

impl<'i> Run<'i> {
    /// Index of the next statement.
    pub fn pc(&self) -> usize {
        self.state.pc()
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn is_halted(&self) -> bool {
        self.state.pc() >= self.statements.len()
    }

    /// Execute the statement at the program counter.
    pub fn step(&mut self) -> Step {
        let pc = self.state.pc();
        let Some(stmt) = self.statements.get(pc) else {
            return Step::Halted;
        };

        if stmt.is_blank() {
            self.state.set_pc(pc + 1);
            return Step::Skipped { index: pc };
        }

        let expanded = expand(&stmt.text, &*self.state.vars);
        if expanded != stmt.text {
            tracing::trace!(pc, from = %stmt.text, to = %expanded, "expanded");
        }

        match self.registry.dispatch(&expanded, &mut self.state) {
            Dispatch::Matched { matcher } => {
                if self.state.pc() != pc + 1 {
                    tracing::warn!(
                        pc,
                        matcher,
                        next = self.state.pc(),
                        "statement form did not advance the program counter by one"
                    );
                    self.state.set_pc(pc + 1);
                }
                Step::Executed { index: pc, matcher }
            }
            Dispatch::Unmatched { kind, reason } => {
                self.state.set_pc(pc + 1);
                let diag = Diagnostic {
                    index: pc,
                    text: stmt.text.clone(),
                    expanded,
                    kind,
                    reason,
                };
                tracing::debug!(%diag, "diagnostic");
                Step::Diagnosed(diag)
            }
        }
    }

    /// Step until halted, handing each diagnostic to `sink` as it occurs.
    pub fn finish(mut self, mut sink: impl FnMut(Diagnostic)) -> RunSummary {
        let mut summary = RunSummary { statements: self.statements.len(), ..Default::default() };
        loop {
            match self.step() {
                Step::Executed { .. } => summary.executed += 1,
                Step::Skipped { .. } => summary.skipped += 1,
                Step::Diagnosed(diag) => {
                    summary.diagnostics += 1;
                    sink(diag);
                }
                Step::Halted => break,
            }
        }
        summary
    }
}

// ── Interpreter ───────────────────────────────────────────────────────────────

/// The script interpreter.
///
/// Variables persist across [`exec_script`](Interpreter::exec_script)
/// calls, so a prelude and a main script can share one store.
#[derive(Debug)]
pub struct Interpreter {
    registry: Registry,
    vars: VarStore,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// An interpreter with the built-in statement forms.
    pub fn new() -> Self {
        Self::with_registry(Registry::standard())
    }

    pub fn with_registry(registry: Registry) -> Self {
        Interpreter { registry, vars: VarStore::new() }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn vars(&self) -> &VarStore {
        &self.vars
    }

    pub fn into_vars(self) -> VarStore {
        self.vars
    }

    /// Set a variable directly, bypassing the grammar.
    pub fn set_var(&mut self, name: impl Into<String>, value: Value) {
        self.vars.set(name, value);
    }

    /// Get a variable's value.
    pub fn get_var(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    // ── Execution ─────────────────────────────────────────────────────────────

    /// Normalize and segment `src`, ready to step.
    pub fn start(&mut self, src: &str) -> Run<'_> {
        let statements = segment(&normalize(src));
        tracing::debug!(statements = statements.len(), "script loaded");
        Run {
            registry: &self.registry,
            state: ExecState::new(&mut self.vars),
            statements,
        }
    }

    /// Run `src` to completion and return its diagnostics in statement order.
    pub fn exec_script(&mut self, src: &str) -> Vec<Diagnostic> {
        let mut diags = Vec::new();
        self.exec_script_with(src, |d| diags.push(d));
        diags
    }

    /// Run `src` to completion, streaming diagnostics to `sink`.
    pub fn exec_script_with(&mut self, src: &str, sink: impl FnMut(Diagnostic)) -> RunSummary {
        let summary = self.start(src).finish(sink);
        tracing::debug!(?summary, "script finished");
        summary
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::diag::DiagnosticKind;
    use crate::script::grammar::{Outcome, StatementMatcher};

    #[test]
    fn assignment_forms() {
        let mut interp = Interpreter::new();
        let diags = interp.exec_script("LET x = 5;\nSET y = '5';\nLET z = 5.5;");
        assert!(diags.is_empty());
        assert_eq!(interp.get_var("x"), Some(&Value::Int(5)));
        assert_eq!(interp.get_var("y"), Some(&Value::Str("5".into())));
        assert_eq!(interp.get_var("z"), Some(&Value::Float(5.5)));
    }

    #[test]
    fn expansion_happens_before_dispatch() {
        let mut interp = Interpreter::new();
        interp.set_var("x", Value::Int(7));
        interp.exec_script("LET y = $(x);");
        assert_eq!(interp.get_var("y"), Some(&Value::Int(7)));
    }

    #[test]
    fn float_survives_expansion() {
        let mut interp = Interpreter::new();
        interp.exec_script("LET a = 2.0; LET b = $(a);");
        assert_eq!(interp.get_var("b"), Some(&Value::Float(2.0)));
    }

    #[test]
    fn expansion_can_build_a_statement() {
        let mut interp = Interpreter::new();
        interp.exec_script("SET kw = LET; $(kw) v = 1;");
        assert_eq!(interp.get_var("v"), Some(&Value::Int(1)));
    }

    #[test]
    fn undefined_reference_kept_verbatim() {
        let mut interp = Interpreter::new();
        let diags = interp.exec_script("SET msg = Hello $(who);");
        assert!(diags.is_empty());
        assert_eq!(interp.get_var("msg"), Some(&Value::Str("Hello $(who)".into())));
    }

    #[test]
    fn reference_inside_stray_dollar_paren_is_expanded() {
        let mut interp = Interpreter::new();
        interp.set_var("a", Value::Int(1));
        let diags = interp.exec_script("SET y = $($(a)); SET z = $( and $(a);");
        assert!(diags.is_empty());
        assert_eq!(interp.get_var("y"), Some(&Value::Str("$(1)".into())));
        assert_eq!(interp.get_var("z"), Some(&Value::Str("$( and 1".into())));
    }

    #[test]
    fn unmatched_statement_is_not_fatal() {
        let mut interp = Interpreter::new();
        let diags = interp.exec_script("GARBAGE;\nLET a = 1;");
        assert_eq!(interp.get_var("a"), Some(&Value::Int(1)));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].index, 0);
        assert_eq!(diags[0].text, "GARBAGE");
        assert_eq!(diags[0].kind, DiagnosticKind::UnmatchedStatement);
    }

    #[test]
    fn malformed_assignment_is_diagnosed() {
        let mut interp = Interpreter::new();
        let diags = interp.exec_script("LET a=1; LET b = 2;");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].index, 0);
        assert_eq!(interp.get_var("a"), None);
        assert_eq!(interp.get_var("b"), Some(&Value::Int(2)));
    }

    #[test]
    fn ambiguous_assignment_is_diagnosed() {
        let mut interp = Interpreter::new();
        let diags = interp.exec_script("LET a = LET b = 1;");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::AmbiguousMatch);
        assert!(interp.vars().is_empty());
    }

    #[test]
    fn blank_statements_are_silent() {
        let mut interp = Interpreter::new();
        let summary = interp.exec_script_with(";;  ; LET a = 1;", |d| panic!("unexpected {d}"));
        assert_eq!(
            summary,
            RunSummary { statements: 4, executed: 1, skipped: 3, diagnostics: 0 }
        );
    }

    #[test]
    fn diagnostic_indices_count_blank_statements() {
        let mut interp = Interpreter::new();
        let diags = interp.exec_script(";; nope;");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].index, 2);
    }

    #[test]
    fn last_assignment_wins() {
        let mut interp = Interpreter::new();
        interp.exec_script("LET a = 1; LET a = 'two';");
        assert_eq!(interp.get_var("a"), Some(&Value::Str("two".into())));
        assert_eq!(interp.vars().len(), 1);
    }

    #[test]
    fn comments_are_ignored() {
        let mut interp = Interpreter::new();
        let diags = interp.exec_script(
            "// header\nREM setup;\nLET a = 1; /* LET a = 2; */\nLET b = 2; // LET b = 3;\n",
        );
        assert!(diags.is_empty(), "{diags:?}");
        assert_eq!(interp.get_var("a"), Some(&Value::Int(1)));
        assert_eq!(interp.get_var("b"), Some(&Value::Int(2)));
    }

    #[test]
    fn unterminated_tail_is_not_run() {
        let mut interp = Interpreter::new();
        let diags = interp.exec_script("LET a = 1; LET b = 2");
        assert!(diags.is_empty());
        assert!(interp.vars().contains("a"));
        assert!(!interp.vars().contains("b"));
    }

    #[test]
    fn variables_persist_across_scripts() {
        let mut interp = Interpreter::new();
        interp.exec_script("SET root = 'lib://data';");
        interp.exec_script("SET file = $(root)/sales.qvd;");
        assert_eq!(interp.get_var("file"), Some(&Value::Str("lib://data/sales.qvd".into())));
    }

    #[test]
    fn step_halts_after_statement_count() {
        let mut interp = Interpreter::new();
        let mut run = interp.start("LET a = 1; junk; ; LET b = 2;");
        assert_eq!(run.statements().len(), 4);
        let mut steps = 0;
        while run.step() != Step::Halted {
            steps += 1;
            assert_eq!(run.pc(), steps);
        }
        assert_eq!(steps, 4);
        assert!(run.is_halted());
        assert_eq!(run.step(), Step::Halted);
    }

    /// Reports a match without touching the program counter.
    #[derive(Debug)]
    struct Lazy;

    impl StatementMatcher for Lazy {
        fn name(&self) -> &'static str {
            "LAZY"
        }

        fn claims(&self, text: &str) -> bool {
            text.trim() == "LAZY"
        }

        fn try_execute(&self, _text: &str, _state: &mut ExecState<'_>) -> Outcome {
            Outcome::Matched
        }
    }

    #[test]
    fn loop_restores_single_step_advance() {
        let mut registry = Registry::standard();
        registry.register(Lazy);
        let mut interp = Interpreter::with_registry(registry);
        let summary = interp.exec_script_with("LAZY; LET a = 1;", |_| {});
        assert_eq!(summary.executed, 2);
        assert_eq!(interp.get_var("a"), Some(&Value::Int(1)));
    }
}
