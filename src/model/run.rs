// src/model/run.rs

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Deserialize;

use crate::model::color::BallColor;

/// "This run was started by run `number` of `job`."
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct UpstreamCause {
    pub job: String,
    pub number: u32,
}

impl fmt::Display for UpstreamCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.job, self.number)
    }
}

/// A build run as a graph vertex. Identity is `(job, number)`.
#[derive(Debug, Clone)]
pub struct RunRef {
    job: String,
    number: u32,
    color: BallColor,
}

impl RunRef {
    pub fn new(job: impl Into<String>, number: u32) -> Self {
        Self {
            job: job.into(),
            number,
            color: BallColor::default(),
        }
    }

    pub fn with_color(mut self, color: BallColor) -> Self {
        self.color = color;
        self
    }

    pub fn job(&self) -> &str {
        &self.job
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn icon_color(&self) -> BallColor {
        self.color
    }

    /// `job #number`, used as the node id in diagrams.
    pub fn full_display_name(&self) -> String {
        format!("{} #{}", self.job, self.number)
    }
}

impl PartialEq for RunRef {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number && self.job == other.job
    }
}

impl Eq for RunRef {}

impl Hash for RunRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.job.hash(state);
        self.number.hash(state);
    }
}

impl PartialOrd for RunRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RunRef {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.job, self.number).cmp(&(&other.job, other.number))
    }
}

impl fmt::Display for RunRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.job, self.number)
    }
}
