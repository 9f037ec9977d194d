//! Data-load script interpreter.
//!
//! Scripts are `;`-terminated statements with case-insensitive keywords.
//! This module covers:
//!
//! - Comment stripping and line folding ([`normalize`])
//! - Statement splitting ([`segment`])
//! - `$(name)` variable expansion ([`expand`])
//! - Statement forms behind the [`StatementMatcher`] seam; `SET`/`LET`
//!   assignment is built in
//! - A program-counter loop that reports unrecognised statements as
//!   [`Diagnostic`]s and never aborts
//!
//! # Quick start
//!
//! ```rust
//! use qvs::script::{Interpreter, Value};
//!
//! let mut interp = Interpreter::new();
//! let diags = interp.exec_script("SET vYear = 2024;\nLET vLabel = 'FY$(vYear)';");
//! assert!(diags.is_empty());
//! assert_eq!(interp.get_var("vLabel"), Some(&Value::Str("FY2024".into())));
//! ```

pub mod assign;
pub mod diag;
pub mod expand;
pub mod grammar;
pub mod interp;
pub mod normalize;
pub mod segment;
pub mod value;

// Re-exports for convenience.
pub use diag::{Diagnostic, DiagnosticKind};
pub use grammar::{ExecState, Outcome, Registry, StatementMatcher};
pub use interp::{Interpreter, Run, RunSummary, Step};
pub use normalize::normalize;
pub use segment::{segment, Statement};
pub use value::Value;
