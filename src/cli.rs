// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::default_config_path;
use crate::render::OutputFormat;

/// Command-line arguments for `triggergraph`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "triggergraph",
    version,
    about = "Draw job trigger and run causation graphs as GraphViz diagrams.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the registry file (TOML) describing jobs, runs and settings.
    #[arg(long, global = true, value_name = "PATH", default_value_os_t = default_config_path())]
    pub registry: PathBuf,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TRIGGERGRAPH_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// `dot` writes the diagram source; any other value is handed to the
    /// renderer as `-T<FORMAT>` (e.g. `svg`, `png`).
    #[arg(long, global = true, value_name = "FORMAT", default_value = "dot")]
    pub format: OutputFormat,

    /// Write to this file instead of stdout.
    #[arg(long, global = true, value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Trigger graph around one job, with everything unrelated pruned.
    Job {
        /// Full name of the job, e.g. `folder/build`.
        name: String,
    },

    /// Trigger graph of every job.
    View,

    /// Chain of runs that caused one run.
    Run { job: String, number: u32 },

    /// Trigger graph of workflow jobs only.
    Workflow {
        /// Job to highlight.
        name: Option<String>,
    },

    /// List the jobs directly upstream and downstream of a job.
    Neighbours { name: String },

    /// List the upstream causes of a run, nearest first.
    Causes { job: String, number: u32 },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Level name as understood by `EnvFilter`.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
