//! Tracing subscriber setup for the `hnsearch` binary.
//!
//! Filter priority: `HNSEARCH_LOG`, then `RUST_LOG`, then the `-v` / `-q`
//! flags, then `warn`. Logs go to stderr so stdout stays clean for `--json`.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub const ENV_LOG: &str = "HNSEARCH_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if verbose {
            Self::Verbose
        } else if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }

    fn default_directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "debug",
        }
    }
}

fn build_env_filter(verbosity: Verbosity) -> EnvFilter {
    let from_env = |var: &str| {
        std::env::var(var)
            .ok()
            .and_then(|directives| EnvFilter::try_new(directives).ok())
    };
    from_env(ENV_LOG)
        .or_else(|| from_env(EnvFilter::DEFAULT_ENV))
        .unwrap_or_else(|| EnvFilter::new(verbosity.default_directive()))
}

/// Install the global subscriber. Call once, first thing in `main`.
pub fn init(verbosity: Verbosity) {
    let stderr_is_tty = std::io::IsTerminal::is_terminal(&std::io::stderr());
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(stderr_is_tty)
        .with_target(false);

    tracing_subscriber::registry()
        .with(build_env_filter(verbosity))
        .with(fmt_layer)
        .init();
}
