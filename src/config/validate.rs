// src/config/validate.rs

use std::collections::HashSet;
use std::path::Path;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, TriggerGraphError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = TriggerGraphError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.settings, raw.job, raw.run))
    }
}

/// Checks applied to every registry file:
/// - at least one job
/// - usable settings (renderer path, edge width, icon directory)
/// - every run belongs to a known job and `(job, number)` is unique
/// - run causes form no cycle
///
/// Unknown names in a job's `upstream` list and causes pointing at runs that
/// are not in the file are tolerated: jobs and builds get deleted, and the
/// registry drops such references at lookup time. Trigger cycles between
/// jobs are allowed.
fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_jobs(cfg)?;
    validate_settings(cfg)?;
    validate_runs(cfg)?;
    validate_cause_chain(cfg)?;
    Ok(())
}

fn ensure_has_jobs(cfg: &RawConfigFile) -> Result<()> {
    if cfg.job.is_empty() {
        return Err(TriggerGraphError::ConfigError(
            "registry must contain at least one [job.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_settings(cfg: &RawConfigFile) -> Result<()> {
    let settings = &cfg.settings;

    if settings.dot_exe.trim().is_empty() {
        return Err(TriggerGraphError::ConfigError(
            "[settings].dot_exe must not be empty".to_string(),
        ));
    }

    if settings.selected_edge_width == 0 {
        return Err(TriggerGraphError::ConfigError(
            "[settings].selected_edge_width must be >= 1 (got 0)".to_string(),
        ));
    }

    if let Some(ref image_path) = settings.image_path {
        if !Path::new(image_path).is_dir() {
            return Err(TriggerGraphError::ConfigError(format!(
                "[settings].image_path '{}' is not a directory",
                image_path
            )));
        }
    }

    Ok(())
}

fn validate_runs(cfg: &RawConfigFile) -> Result<()> {
    let mut seen: HashSet<(&str, u32)> = HashSet::new();
    for run in cfg.run.iter() {
        if !cfg.job.contains_key(&run.job) {
            return Err(TriggerGraphError::ConfigError(format!(
                "run #{} belongs to unknown job '{}'",
                run.number, run.job
            )));
        }
        if !seen.insert((run.job.as_str(), run.number)) {
            return Err(TriggerGraphError::ConfigError(format!(
                "run '{} #{}' is declared more than once",
                run.job, run.number
            )));
        }
    }
    Ok(())
}

fn validate_cause_chain(cfg: &RawConfigFile) -> Result<()> {
    // Edge direction: cause -> caused run.
    let mut graph: DiGraphMap<(&str, u32), ()> = DiGraphMap::new();

    for run in cfg.run.iter() {
        let caused = (run.job.as_str(), run.number);
        graph.add_node(caused);
        for cause in run.causes.iter() {
            graph.add_edge((cause.job.as_str(), cause.number), caused, ());
        }
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => {
            let (job, number) = cycle.node_id();
            Err(TriggerGraphError::CauseCycle(format!(
                "cycle detected in run causes involving run '{} #{}'",
                job, number
            )))
        }
    }
}
