//! Interpreter configuration: seed variables and the prelude script.
//!
//! A *prelude* is an ordinary script run before the user's scripts, typically
//! a list of `SET` statements for shared settings:
//!
//! ```text
//! SET ThousandSep = ',';
//! SET DecimalSep = '.';
//! SET vDataRoot = 'lib://warehouse';
//! ```
//!
//! | Source | Meaning |
//! |--------|---------|
//! | `--prelude <file>` | run this file |
//! | `--no-prelude` | run no prelude |
//! | neither | search `$QVS_PRELUDE`, `<config dir>/qvs/prelude.qvs`, `./.qvsrc` |

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::script::{Diagnostic, Interpreter, Value};
use crate::var::is_valid_name;

/// Environment variable naming an explicit prelude file.
pub const PRELUDE_ENV: &str = "QVS_PRELUDE";

/// File name searched for in the current directory.
pub const LOCAL_PRELUDE: &str = ".qvsrc";

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read prelude {}: {source}", path.display())]
    ReadPrelude {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid definition {0:?}: expected NAME=VALUE")]
    MalformedDefine(String),
    #[error("invalid variable name {0:?}")]
    InvalidName(String),
}

// ── Config ────────────────────────────────────────────────────────────────────

/// How to choose the prelude script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Prelude {
    /// Search the standard locations (default).
    #[default]
    Search,
    /// Run no prelude.
    Skip,
    /// Run this specific file.
    Explicit(PathBuf),
}

/// Settings applied to an [`Interpreter`] before user scripts run.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub prelude: Prelude,
    /// Variables set before the prelude runs, in order.
    pub defines: Vec<(String, Value)>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `NAME=VALUE` seed variable.  The value is coerced the same way
    /// as an assignment's value.
    pub fn define(&mut self, spec: &str) -> Result<(), ConfigError> {
        let (name, value) = parse_define(spec)?;
        self.defines.push((name, value));
        Ok(())
    }

    /// The prelude file to run, if any.
    pub fn prelude_path(&self) -> Option<PathBuf> {
        match &self.prelude {
            Prelude::Skip => None,
            Prelude::Explicit(path) => Some(path.clone()),
            Prelude::Search => find_prelude(),
        }
    }

    /// Seed variables, then run the prelude.  Returns the prelude's
    /// diagnostics.
    pub fn apply(&self, interp: &mut Interpreter) -> Result<Vec<Diagnostic>, ConfigError> {
        for (name, value) in &self.defines {
            interp.set_var(name.clone(), value.clone());
        }
        let Some(path) = self.prelude_path() else {
            return Ok(Vec::new());
        };
        let src = std::fs::read_to_string(&path)
            .map_err(|source| ConfigError::ReadPrelude { path: path.clone(), source })?;
        tracing::debug!(path = %path.display(), "running prelude");
        Ok(interp.exec_script(&src))
    }
}

/// Parse a `NAME=VALUE` definition.
pub fn parse_define(spec: &str) -> Result<(String, Value), ConfigError> {
    let Some((name, value)) = spec.split_once('=') else {
        return Err(ConfigError::MalformedDefine(spec.to_owned()));
    };
    let name = name.trim();
    if !is_valid_name(name) {
        return Err(ConfigError::InvalidName(name.to_owned()));
    }
    Ok((name.to_owned(), Value::coerce(value)))
}

// ── Prelude discovery ─────────────────────────────────────────────────────────

/// Search the standard prelude locations.
pub fn find_prelude() -> Option<PathBuf> {
    let env = std::env::var_os(PRELUDE_ENV).map(PathBuf::from);
    let config_dir = directories::ProjectDirs::from("", "", "qvs")
        .map(|dirs| dirs.config_dir().to_path_buf());
    search_prelude(env, config_dir.as_deref(), Path::new("."))
}

/// Prelude search over explicit locations (exposed for testing).
///
/// Priority: `env` (used even if the file is missing, so that a typo is
/// reported rather than silently skipped) → `config_dir/prelude.qvs` →
/// `cwd/.qvsrc`.
pub fn search_prelude(
    env: Option<PathBuf>,
    config_dir: Option<&Path>,
    cwd: &Path,
) -> Option<PathBuf> {
    if let Some(path) = env.filter(|p| !p.as_os_str().is_empty()) {
        return Some(path);
    }
    config_dir
        .map(|dir| dir.join("prelude.qvs"))
        .into_iter()
        .chain(std::iter::once(cwd.join(LOCAL_PRELUDE)))
        .find(|p| p.exists())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
