// src/triggers/mod.rs

//! The three trigger graphs built on top of [`crate::graph::DirectedGraph`].
//!
//! - [`job_graph`]: jobs of every kind, with pruning around a selected job
//!   and transitive trigger counts.
//! - [`run_graph`]: the causation chain of one run.
//! - [`workflow_graph`]: workflow jobs only.

pub mod job_graph;
pub mod run_graph;
pub mod workflow_graph;

pub use job_graph::JobGraph;
pub use run_graph::RunTriggerGraph;
pub use workflow_graph::WorkflowJobGraph;
