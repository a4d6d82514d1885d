#![allow(dead_code)]

use triggergraph::config::{ConfigFile, JobConfig, RawConfigFile, RunConfig, Settings};
use triggergraph::model::{BallColor, JobKind, UpstreamCause};
use triggergraph::registry::Registry;

/// Builder for `ConfigFile` / `Registry` to simplify test setup.
pub struct RegistryBuilder {
    config: RawConfigFile,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn with_job(mut self, name: &str, job: JobConfig) -> Self {
        self.config.job.insert(name.to_string(), job);
        self
    }

    /// Shorthand for a workflow job triggered by `upstream` (comma-separated).
    pub fn workflow(self, name: &str, upstream: &str) -> Self {
        self.with_job(name, JobConfigBuilder::workflow().upstream(upstream).build())
    }

    /// Shorthand for a project job triggered by `upstream` (comma-separated).
    pub fn project(self, name: &str, upstream: &str) -> Self {
        self.with_job(name, JobConfigBuilder::project().upstream(upstream).build())
    }

    pub fn with_run(mut self, run: RunConfig) -> Self {
        self.config.run.push(run);
        self
    }

    pub fn settings(mut self, f: impl FnOnce(&mut Settings)) -> Self {
        f(&mut self.config.settings);
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build_config(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }

    pub fn build(self) -> Registry {
        Registry::from_config(&self.build_config())
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `JobConfig`.
pub struct JobConfigBuilder {
    job: JobConfig,
}

impl JobConfigBuilder {
    pub fn workflow() -> Self {
        Self {
            job: JobConfig {
                kind: JobKind::Workflow,
                ..JobConfig::default()
            },
        }
    }

    pub fn project() -> Self {
        Self {
            job: JobConfig {
                kind: JobKind::Project,
                ..JobConfig::default()
            },
        }
    }

    pub fn upstream(mut self, upstream: &str) -> Self {
        self.job.upstream = upstream.to_string();
        self
    }

    pub fn disabled(mut self, val: bool) -> Self {
        self.job.disabled = val;
        self
    }

    pub fn color(mut self, color: BallColor) -> Self {
        self.job.color = color;
        self
    }

    pub fn url(mut self, url: &str) -> Self {
        self.job.url = Some(url.to_string());
        self
    }

    pub fn build(self) -> JobConfig {
        self.job
    }
}

/// Builder for `RunConfig`.
pub struct RunConfigBuilder {
    run: RunConfig,
}

impl RunConfigBuilder {
    pub fn new(job: &str, number: u32) -> Self {
        Self {
            run: RunConfig {
                job: job.to_string(),
                number,
                color: BallColor::default(),
                causes: vec![],
            },
        }
    }

    pub fn caused_by(mut self, job: &str, number: u32) -> Self {
        self.run.causes.push(UpstreamCause {
            job: job.to_string(),
            number,
        });
        self
    }

    pub fn color(mut self, color: BallColor) -> Self {
        self.run.color = color;
        self
    }

    pub fn build(self) -> RunConfig {
        self.run
    }
}
