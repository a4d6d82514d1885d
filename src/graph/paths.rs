// src/graph/paths.rs

use std::collections::HashMap;
use std::hash::Hash;

use crate::graph::directed::DirectedGraph;

/// Number of distinct paths from any source into each vertex.
///
/// Vertices are processed in topological order, so a vertex's predecessors
/// are final before it is counted: a source counts 1, any other vertex the
/// sum of its predecessors' counts. A predecessor that is not final yet (it
/// closes a cycle) contributes a single path.
///
/// Vertices missing from [`DirectedGraph::topological_order`] (only reachable
/// from inside a source-free cycle) get no entry.
pub fn path_counts<V>(graph: &DirectedGraph<V>) -> HashMap<V, u64>
where
    V: Eq + Hash + Clone,
{
    let order = graph.topological_order();
    let mut counts: HashMap<V, u64> = HashMap::with_capacity(order.len());

    for vertex in order {
        let count = match graph.predecessors(vertex) {
            Ok(preds) if !preds.is_empty() => preds
                .iter()
                .map(|p| counts.get(p).copied().unwrap_or(1))
                .fold(0u64, u64::saturating_add),
            _ => 1,
        };
        counts.insert(vertex.clone(), count);
    }

    counts
}
