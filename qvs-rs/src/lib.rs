//! `qvs`: statement interpreter for data-load scripts.
//!
//! See [`script`] for the language core and [`script::Interpreter`] for the
//! entry point.  [`config`] and [`cli`] make up the `qvs` binary.

pub mod cli;
pub mod config;
pub mod pattern;
pub mod script;
pub mod var;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the `tracing` subscriber used by the binary.
///
/// Logs go to stderr.  `RUST_LOG` overrides `default_directive` (e.g.
/// `"warn"` or `"qvs=debug"`).  Safe to call more than once; only the first
/// call has any effect.
pub fn init_tracing(default_directive: &str) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive));
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_level(true),
            )
            .with(filter)
            .init();
    });
}
