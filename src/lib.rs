// src/lib.rs

pub mod cli;
pub mod config;
pub mod dot;
pub mod errors;
pub mod graph;
pub mod logging;
pub mod model;
pub mod registry;
pub mod render;
pub mod triggers;

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Result;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::cli::{CliArgs, Command};
use crate::config::load_and_validate;
use crate::registry::Registry;
use crate::render::render;
use crate::triggers::{JobGraph, RunTriggerGraph, WorkflowJobGraph};

/// What a command produces before it is written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// DOT text, rendered according to `--format`.
    Diagram(String),
    /// Plain text listing, written as is.
    Listing(String),
}

/// High-level entry point used by `main.rs`.
///
/// Loads the registry, builds the graph the command asks for, renders it and
/// writes the result to `--output` or stdout. Every graph is built for this
/// call only and dropped at the end.
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_and_validate(&args.registry)?;
    let registry = Registry::from_config(&cfg);
    info!(registry = %args.registry.display(), "registry loaded");

    let bytes = match build_output(&registry, &args.command)? {
        Output::Diagram(dot) => {
            render(&registry.settings().dot_exe, &dot, &args.format).await?
        }
        Output::Listing(text) => text.into_bytes(),
    };

    write_output(args.output.as_deref(), &bytes).await?;
    debug!(bytes = bytes.len(), "output written");
    Ok(())
}

/// Build the diagram or listing for `command`.
pub fn build_output(registry: &Registry, command: &Command) -> errors::Result<Output> {
    let output = match command {
        Command::Job { name } => {
            let job = registry.require_job(name)?;
            let mut graph = JobGraph::new(registry);
            graph.remove_unconnected_nodes(job)?;
            Output::Diagram(graph.dot_string(Some(job)))
        }
        Command::View => Output::Diagram(JobGraph::new(registry).dot_string(None)),
        Command::Run { job, number } => {
            let run = registry.require_run(job, *number)?;
            Output::Diagram(RunTriggerGraph::new(registry, run.clone()).dot())
        }
        Command::Workflow { name } => {
            let current = name
                .as_deref()
                .map(|name| registry.require_job(name))
                .transpose()?;
            Output::Diagram(WorkflowJobGraph::new(registry).dot_string(current))
        }
        Command::Neighbours { name } => {
            let job = registry.require_job(name)?;
            let graph = JobGraph::new(registry);
            let mut text = String::new();
            let _ = writeln!(text, "upstream of {job}:");
            for upstream in sorted(graph.upstream_of_job(job)?) {
                let _ = writeln!(text, "  {upstream}");
            }
            let _ = writeln!(text, "downstream of {job}:");
            for downstream in sorted(graph.downstream_of_job(job)?) {
                let _ = writeln!(text, "  {downstream}");
            }
            Output::Listing(text)
        }
        Command::Causes { job, number } => {
            let run = registry.require_run(job, *number)?;
            let graph = RunTriggerGraph::new(registry, run.clone());
            let causes = graph.upstream_causes();
            let mut text = String::new();
            if causes.is_empty() {
                let _ = writeln!(text, "{run} was not started by another run");
            }
            for cause in causes {
                let _ = writeln!(text, "{cause}");
            }
            Output::Listing(text)
        }
    };
    Ok(output)
}

fn sorted<'a, T: Ord>(items: impl IntoIterator<Item = &'a T>) -> Vec<&'a T>
where
    T: 'a,
{
    let mut items: Vec<&T> = items.into_iter().collect();
    items.sort();
    items
}

async fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) => tokio::fs::write(path, bytes).await?,
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(bytes).await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}
