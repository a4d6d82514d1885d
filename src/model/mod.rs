// src/model/mod.rs

//! Vertex types: jobs and runs, compared by identity rather than snapshot.

pub mod color;
pub mod job;
pub mod run;

pub use color::BallColor;
pub use job::{JobKind, JobRef};
pub use run::{RunRef, UpstreamCause};
