// src/logging.rs

//! `tracing` subscriber for the binary.
//!
//! The filter is taken from `--log-level` when given, otherwise from the
//! `TRIGGERGRAPH_LOG` variable, which accepts full `EnvFilter` directives
//! (e.g. `info,triggergraph::graph=trace`). Without either, `info`.
//!
//! Everything is written to stderr; stdout carries diagrams and listings.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

pub const LOG_ENV: &str = "TRIGGERGRAPH_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    fmt()
        .with_env_filter(filter_for(cli_level))
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(anyhow::Error::msg)
}

/// Filter for the given CLI level, falling back to [`LOG_ENV`].
pub fn filter_for(cli_level: Option<LogLevel>) -> EnvFilter {
    match cli_level {
        Some(level) => EnvFilter::new(level.as_directive()),
        None => EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)),
    }
}
