// src/graph/crawl.rs

use std::collections::{HashSet, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;

use tracing::trace;

use crate::graph::directed::DirectedGraph;

/// Supplies the immediate upstream (predecessor) set of a vertex.
///
/// Implemented by whatever knows how things trigger each other; the graph
/// only records what it is told.
pub trait UpstreamSource<V> {
    fn upstream_of(&self, vertex: &V) -> Vec<V>;
}

/// Breadth-first crawl upstream from `start`, adding an edge
/// `predecessor -> vertex` for every predecessor reported by `source`.
///
/// Vertices already in the graph before the crawl are assumed to be fully
/// loaded and are not expanded again, so repeated crawls over a registry
/// touch each vertex once.
pub fn load_upstream<V, S>(graph: &mut DirectedGraph<V>, start: V, source: &S)
where
    V: Eq + Hash + Clone + Debug,
    S: UpstreamSource<V> + ?Sized,
{
    if graph.contains_vertex(&start) {
        return;
    }

    let mut discovered: HashSet<V> = HashSet::from([start.clone()]);
    let mut queue: VecDeque<V> = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        graph.add_vertex(current.clone());

        let upstream = source.upstream_of(&current);
        trace!(vertex = ?current, upstream = upstream.len(), "expanding vertex");

        for predecessor in upstream {
            let already_loaded = graph.contains_vertex(&predecessor);
            graph.add_edge(predecessor.clone(), current.clone());
            if !already_loaded && discovered.insert(predecessor.clone()) {
                queue.push_back(predecessor);
            }
        }
    }
}
