// src/registry.rs

//! In-memory job/run registry built from a validated [`ConfigFile`].
//!
//! The registry answers "which jobs trigger this job" (from each job's
//! reverse build trigger list) and "which runs caused this run" (from each
//! run's causes). Both are exposed as [`UpstreamSource`]s so the graph
//! builders can crawl them breadth-first.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, warn};

use crate::config::{ConfigFile, Settings};
use crate::errors::{Result, TriggerGraphError};
use crate::graph::UpstreamSource;
use crate::model::{JobRef, RunRef, UpstreamCause};

#[derive(Debug, Clone)]
struct JobEntry {
    job: JobRef,
    upstream: String,
}

#[derive(Debug, Clone)]
pub struct Registry {
    settings: Settings,
    jobs: BTreeMap<String, JobEntry>,
    runs: HashMap<RunRef, Vec<UpstreamCause>>,
}

impl Registry {
    pub fn from_config(cfg: &ConfigFile) -> Self {
        let jobs = cfg
            .job
            .iter()
            .map(|(name, jc)| {
                let mut job = JobRef::new(name.clone(), jc.kind)
                    .with_disabled(jc.disabled)
                    .with_color(jc.color);
                if let Some(ref url) = jc.url {
                    job = job.with_url(url.clone());
                }
                let entry = JobEntry {
                    job,
                    upstream: jc.upstream.clone(),
                };
                (name.clone(), entry)
            })
            .collect();

        let runs = cfg
            .run
            .iter()
            .map(|rc| {
                let run = RunRef::new(rc.job.clone(), rc.number).with_color(rc.color);
                (run, rc.causes.clone())
            })
            .collect();

        Self {
            settings: cfg.settings.clone(),
            jobs,
            runs,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// All jobs, ordered by full name.
    pub fn jobs(&self) -> impl Iterator<Item = &JobRef> {
        self.jobs.values().map(|entry| &entry.job)
    }

    pub fn job(&self, full_name: &str) -> Option<&JobRef> {
        self.jobs.get(full_name).map(|entry| &entry.job)
    }

    pub fn require_job(&self, full_name: &str) -> Result<&JobRef> {
        self.job(full_name)
            .ok_or_else(|| TriggerGraphError::JobNotFound(full_name.to_string()))
    }

    pub fn run(&self, job: &str, number: u32) -> Option<&RunRef> {
        self.runs
            .get_key_value(&RunRef::new(job, number))
            .map(|(run, _)| run)
    }

    pub fn require_run(&self, job: &str, number: u32) -> Result<&RunRef> {
        self.run(job, number)
            .ok_or_else(|| TriggerGraphError::RunNotFound(job.to_string(), number))
    }

    /// Causes of `run`, first cause first. Empty for unknown runs.
    pub fn causes_of(&self, run: &RunRef) -> &[UpstreamCause] {
        self.runs.get(run).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Jobs named in the reverse build trigger of `job`.
    ///
    /// Names are comma-separated and trimmed; names that do not resolve to a
    /// known job are dropped.
    pub fn upstream_jobs(&self, job: &JobRef) -> Vec<JobRef> {
        let Some(entry) = self.jobs.get(job.full_name()) else {
            return Vec::new();
        };

        parse_job_list(&entry.upstream)
            .filter_map(|name| match self.job(name) {
                Some(upstream) => Some(upstream.clone()),
                None => {
                    debug!(job = %job, upstream = name, "ignoring trigger from unknown job");
                    None
                }
            })
            .collect()
    }
}

/// Split a comma-separated job list, trimming names and skipping blanks.
pub fn parse_job_list(projects: &str) -> impl Iterator<Item = &str> {
    projects
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

impl UpstreamSource<JobRef> for Registry {
    fn upstream_of(&self, job: &JobRef) -> Vec<JobRef> {
        self.upstream_jobs(job)
    }
}

impl UpstreamSource<RunRef> for Registry {
    fn upstream_of(&self, run: &RunRef) -> Vec<RunRef> {
        self.causes_of(run)
            .iter()
            .filter_map(|cause| match self.run(&cause.job, cause.number) {
                Some(upstream) => Some(upstream.clone()),
                None => {
                    debug!(run = %run, cause = %cause, "upstream run no longer exists");
                    None
                }
            })
            .collect()
    }
}

/// Upstream view restricted to workflow jobs.
///
/// Triggers naming a non-workflow job are dropped with a warning.
#[derive(Debug, Clone, Copy)]
pub struct WorkflowTriggers<'a>(pub &'a Registry);

impl UpstreamSource<JobRef> for WorkflowTriggers<'_> {
    fn upstream_of(&self, job: &JobRef) -> Vec<JobRef> {
        self.0
            .upstream_jobs(job)
            .into_iter()
            .filter(|upstream| {
                if upstream.is_workflow() {
                    true
                } else {
                    warn!(
                        job = %job,
                        upstream = %upstream,
                        "workflow graph ignores trigger from non-workflow job"
                    );
                    false
                }
            })
            .collect()
    }
}
