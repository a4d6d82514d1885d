// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::model::{BallColor, JobKind, UpstreamCause};

/// Registry snapshot as read from a TOML file, before validation.
///
/// ```toml
/// [settings]
/// hide_disabled = true
///
/// [job.checkout]
/// color = "blue"
///
/// [job."folder/build"]
/// kind = "project"
/// upstream = "checkout, lint"
///
/// [[run]]
/// job = "folder/build"
/// number = 7
/// causes = [{ job = "checkout", number = 3 }]
/// ```
///
/// All sections are optional at this level; [`ConfigFile`] is the validated
/// form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    /// Rendering preferences from `[settings]`.
    #[serde(default)]
    pub settings: Settings,

    /// All jobs from `[job.<full name>]`.
    #[serde(default)]
    pub job: BTreeMap<String, JobConfig>,

    /// All runs from `[[run]]`.
    #[serde(default)]
    pub run: Vec<RunConfig>,
}

/// Validated registry snapshot. Build one with `ConfigFile::try_from`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub settings: Settings,
    pub job: BTreeMap<String, JobConfig>,
    pub run: Vec<RunConfig>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        settings: Settings,
        job: BTreeMap<String, JobConfig>,
        run: Vec<RunConfig>,
    ) -> Self {
        Self { settings, job, run }
    }
}

/// `[settings]` section: user preferences for diagram output.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Renderer executable.
    pub dot_exe: String,

    /// Directory prefix for status icons drawn inside nodes.
    pub image_path: Option<String>,

    /// Draw a status icon inside every node.
    pub draw_balls: bool,

    /// Leave disabled jobs (and their edges) out of job diagrams.
    pub hide_disabled: bool,

    /// `rankdir=LR` when true, `rankdir=TB` otherwise.
    pub left_to_right_layout: bool,

    /// Show in every job node how many trigger paths lead to it.
    pub count_triggers_transitively: bool,

    /// When pruning around a job, keep only its direct upstream line rather
    /// than everything weakly connected to it.
    pub linear_upstream_of_project: bool,

    /// Pen width for edges touching the selected job.
    pub selected_edge_width: u32,

    /// Prefix turning a job url into an absolute `href`.
    pub root_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dot_exe: default_dot_exe().to_string(),
            image_path: None,
            draw_balls: false,
            hide_disabled: false,
            left_to_right_layout: true,
            count_triggers_transitively: false,
            linear_upstream_of_project: false,
            selected_edge_width: 1,
            root_url: String::new(),
        }
    }
}

fn default_dot_exe() -> &'static str {
    if cfg!(windows) { "dot.exe" } else { "dot" }
}

impl Settings {
    /// `keepUnreachableSiblings` flag for pruning around a selected job.
    pub fn keep_unreachable_siblings(&self) -> bool {
        !self.linear_upstream_of_project
    }

    pub fn rankdir(&self) -> &'static str {
        if self.left_to_right_layout { "LR" } else { "TB" }
    }
}

/// `[job.<full name>]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobConfig {
    #[serde(default)]
    pub kind: JobKind,

    #[serde(default)]
    pub disabled: bool,

    /// Url relative to `root_url`; derived from the full name if omitted.
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub color: BallColor,

    /// Reverse build trigger: comma-separated full names of the jobs whose
    /// completion starts this one.
    #[serde(default)]
    pub upstream: String,
}

/// `[[run]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    pub job: String,

    pub number: u32,

    #[serde(default)]
    pub color: BallColor,

    /// Upstream runs that started this one, first cause first.
    #[serde(default)]
    pub causes: Vec<UpstreamCause>,
}
