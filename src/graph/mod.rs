// src/graph/mod.rs

//! Generic directed graph engine.
//!
//! - [`directed`] holds the vertex/edge store with its queries, pruning and
//!   topological order.
//! - [`paths`] counts source-to-vertex paths on top of the topological order.
//! - [`crawl`] populates a graph by walking upstream through an
//!   [`UpstreamSource`].

pub mod crawl;
pub mod directed;
pub mod paths;

pub use crawl::{UpstreamSource, load_upstream};
pub use directed::{DirectedGraph, UnknownVertex};
pub use paths::path_counts;
