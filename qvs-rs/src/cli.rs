//! Command-line interface.
//!
//! Usage:
//!   qvs [-D NAME=VALUE]... [-p FILE | --no-prelude] [-c TEXT] [--json] [--strict] [-qd] [FILE]...
//!
//! Scripts run in order against one shared variable store: seed variables,
//! prelude, each `FILE` (`-` is stdin; no files and no `-c` means stdin),
//! then the `-c` text.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Serialize;
use thiserror::Error;

use crate::config::{Config, ConfigError, Prelude};
use crate::script::{Diagnostic, Interpreter, Value};
use crate::var::VarStore;

// ── Arguments ─────────────────────────────────────────────────────────────────

/// Run data-load scripts and print the resulting variables.
#[derive(Debug, Parser)]
#[command(name = "qvs", version)]
pub struct CliArgs {
    /// Script files, run in order (`-` reads stdin).
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Script text to run after the files.
    #[arg(short = 'c', long = "command", value_name = "TEXT")]
    pub command: Option<String>,

    /// Seed a variable before anything runs.
    #[arg(short = 'D', long = "define", value_name = "NAME=VALUE")]
    pub defines: Vec<String>,

    /// Run this prelude script first.
    #[arg(short = 'p', long, value_name = "FILE", conflicts_with = "no_prelude")]
    pub prelude: Option<PathBuf>,

    /// Do not look for a prelude script.
    #[arg(long)]
    pub no_prelude: bool,

    /// Print the variable table as JSON.
    #[arg(long)]
    pub json: bool,

    /// Exit with status 2 if any statement produced a diagnostic.
    #[arg(long)]
    pub strict: bool,

    /// Do not print the variable table.
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    pub debug: bool,
}

impl CliArgs {
    /// Build the interpreter [`Config`] from the flags.
    pub fn config(&self) -> Result<Config, ConfigError> {
        let mut config = Config::new();
        config.prelude = match (&self.prelude, self.no_prelude) {
            (_, true) => Prelude::Skip,
            (Some(path), false) => Prelude::Explicit(path.clone()),
            (None, false) => Prelude::Search,
        };
        for spec in &self.defines {
            config.define(spec)?;
        }
        Ok(config)
    }

    /// The scripts to run, in order.
    pub fn sources(&self) -> Vec<Source> {
        let mut sources: Vec<Source> = self
            .files
            .iter()
            .map(|p| if p.as_os_str() == "-" { Source::Stdin } else { Source::File(p.clone()) })
            .collect();
        if let Some(text) = &self.command {
            sources.push(Source::Text(text.clone()));
        }
        if sources.is_empty() {
            sources.push(Source::Stdin);
        }
        sources
    }
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot read {}: {source}", path.display())]
    ReadScript {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot read standard input: {0}")]
    ReadStdin(#[source] std::io::Error),
    #[error("cannot encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// ── Script sources ────────────────────────────────────────────────────────────

/// Where a script's text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Stdin,
    Text(String),
}

impl Source {
    /// Label used in log output.
    pub fn label(&self) -> String {
        match self {
            Source::File(p) => p.display().to_string(),
            Source::Stdin => "<stdin>".to_owned(),
            Source::Text(_) => "<command>".to_owned(),
        }
    }

    /// Read the script text.
    pub fn read(&self) -> Result<String, CliError> {
        match self {
            Source::File(path) => read_script(path),
            Source::Stdin => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf).map_err(CliError::ReadStdin)?;
                Ok(buf)
            }
            Source::Text(text) => Ok(text.clone()),
        }
    }
}

fn read_script(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path)
        .map_err(|source| CliError::ReadScript { path: path.to_path_buf(), source })
}

// ── Running ───────────────────────────────────────────────────────────────────

/// Outcome of a CLI invocation.
#[derive(Debug)]
pub struct Report {
    pub vars: VarStore,
    pub diagnostics: usize,
}

/// Apply the configuration and run every source, logging diagnostics as
/// they occur.  Stops at the first source that cannot be read.
pub fn run(args: &CliArgs) -> Result<Report, CliError> {
    let config = args.config()?;
    let mut interp = Interpreter::new();
    let mut diagnostics = 0;

    for diag in config.apply(&mut interp)? {
        report_diagnostic("<prelude>", &diag);
        diagnostics += 1;
    }

    for source in args.sources() {
        let label = source.label();
        let text = source.read()?;
        let summary = interp.exec_script_with(&text, |diag| report_diagnostic(&label, &diag));
        tracing::debug!(source = %label, ?summary, "script done");
        diagnostics += summary.diagnostics;
    }

    Ok(Report { vars: interp.into_vars(), diagnostics })
}

fn report_diagnostic(source: &str, diag: &Diagnostic) {
    tracing::warn!(source, index = diag.index, kind = %diag.kind, "{diag}");
}

/// Exit status for a finished run: 2 under `--strict` when any statement
/// was diagnosed, else 0.
pub fn exit_status(args: &CliArgs, report: &Report) -> u8 {
    if args.strict && report.diagnostics > 0 {
        2
    } else {
        0
    }
}

// ── Output ────────────────────────────────────────────────────────────────────

/// One `name = value` line per variable, sorted by name.
pub fn render_table(vars: &VarStore) -> String {
    let mut out = String::new();
    for (name, var) in vars.sorted() {
        out.push_str(name);
        out.push_str(" = ");
        match &var.value {
            Value::Str(s) => {
                out.push('\'');
                out.push_str(s);
                out.push('\'');
            }
            other => out.push_str(&other.to_string()),
        }
        out.push('\n');
    }
    out
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    kind: &'static str,
    #[serde(rename = "type")]
    ty: &'static str,
    value: &'a Value,
}

/// The variable table as a JSON object keyed by name.
pub fn render_json(vars: &VarStore) -> Result<String, CliError> {
    let entries: serde_json::Map<String, serde_json::Value> = vars
        .sorted()
        .into_iter()
        .map(|(name, var)| {
            let entry = JsonEntry {
                kind: var.kind.as_str(),
                ty: var.value.type_name(),
                value: &var.value,
            };
            serde_json::to_value(entry).map(|v| (name.clone(), v))
        })
        .collect::<Result<_, _>>()?;
    Ok(serde_json::to_string_pretty(&entries)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
