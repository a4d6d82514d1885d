// src/model/job.rs

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Deserialize;

use crate::model::color::BallColor;

/// Which flavour of job this is. Only workflow jobs take part in the
/// workflow-only graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobKind {
    #[default]
    Workflow,
    Project,
}

/// A job as a graph vertex.
///
/// Identity is the full name only: two `JobRef`s for the same job compare
/// equal even if they were built from different snapshots.
#[derive(Debug, Clone)]
pub struct JobRef {
    full_name: String,
    kind: JobKind,
    disabled: bool,
    url: String,
    color: BallColor,
}

impl JobRef {
    pub fn new(full_name: impl Into<String>, kind: JobKind) -> Self {
        let full_name = full_name.into();
        let url = default_url(&full_name);
        Self {
            full_name,
            kind,
            disabled: false,
            url,
            color: BallColor::default(),
        }
    }

    pub fn workflow(full_name: impl Into<String>) -> Self {
        Self::new(full_name, JobKind::Workflow)
    }

    pub fn project(full_name: impl Into<String>) -> Self {
        Self::new(full_name, JobKind::Project)
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Override the derived url. A missing trailing `/` is added.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        let mut url = url.into();
        if !url.is_empty() && !url.ends_with('/') {
            url.push('/');
        }
        self.url = url;
        self
    }

    pub fn with_color(mut self, color: BallColor) -> Self {
        self.color = color;
        self
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Last path segment of the full name.
    pub fn display_name(&self) -> &str {
        self.full_name
            .rsplit('/')
            .next()
            .unwrap_or(&self.full_name)
    }

    pub fn kind(&self) -> JobKind {
        self.kind
    }

    pub fn is_workflow(&self) -> bool {
        self.kind == JobKind::Workflow
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Url relative to the server root, always ending in `/`.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn absolute_url(&self, root_url: &str) -> String {
        format!("{root_url}{}", self.url)
    }

    pub fn icon_color(&self) -> BallColor {
        self.color
    }
}

/// `folder/build` lives at `job/folder/job/build/`.
fn default_url(full_name: &str) -> String {
    let mut url = String::new();
    for segment in full_name.split('/').filter(|s| !s.is_empty()) {
        url.push_str("job/");
        url.push_str(segment);
        url.push('/');
    }
    url
}

impl PartialEq for JobRef {
    fn eq(&self, other: &Self) -> bool {
        self.full_name == other.full_name
    }
}

impl Eq for JobRef {}

impl Hash for JobRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.full_name.hash(state);
    }
}

impl PartialOrd for JobRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for JobRef {
    fn cmp(&self, other: &Self) -> Ordering {
        self.full_name.cmp(&other.full_name)
    }
}

impl fmt::Display for JobRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name)
    }
}
