// src/graph/directed.rs

use std::collections::hash_set;
use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::Hash;

use thiserror::Error;
use tracing::debug;

/// Returned by adjacency queries for a vertex that was never inserted.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("vertex is not part of the graph")]
pub struct UnknownVertex;

/// Directed graph over any value-comparable vertex type.
///
/// Both adjacency directions are stored and kept symmetric: `v` is in the
/// successors of `u` exactly when `u` is in the predecessors of `v`, and
/// every inserted vertex has an entry in both maps (possibly empty).
///
/// Cycles and self-loops are allowed. Every traversal tracks the vertices it
/// has already seen, so all operations terminate in O(V + E).
#[derive(Debug, Clone)]
pub struct DirectedGraph<V> {
    forward: HashMap<V, HashSet<V>>,
    backward: HashMap<V, HashSet<V>>,
}

impl<V> Default for DirectedGraph<V> {
    fn default() -> Self {
        Self {
            forward: HashMap::new(),
            backward: HashMap::new(),
        }
    }
}

impl<V> DirectedGraph<V>
where
    V: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every vertex and edge, keeping the graph value itself alive.
    pub fn reset(&mut self) {
        self.forward.clear();
        self.backward.clear();
    }

    /// Insert `vertex` with no edges. No-op if it is already present.
    pub fn add_vertex(&mut self, vertex: V) {
        self.forward.entry(vertex.clone()).or_default();
        self.backward.entry(vertex).or_default();
    }

    /// Insert the edge `from -> to`, adding either endpoint if missing.
    pub fn add_edge(&mut self, from: V, to: V) {
        self.forward
            .entry(from.clone())
            .or_default()
            .insert(to.clone());
        self.backward
            .entry(to.clone())
            .or_default()
            .insert(from.clone());
        self.forward.entry(to).or_default();
        self.backward.entry(from).or_default();
    }

    /// Remove `vertex` and every edge touching it. No-op if absent.
    pub fn remove_vertex(&mut self, vertex: &V) {
        let Some(successors) = self.forward.remove(vertex) else {
            return;
        };
        let predecessors = self.backward.remove(vertex).unwrap_or_default();

        for successor in &successors {
            if let Some(preds) = self.backward.get_mut(successor) {
                preds.remove(vertex);
            }
        }
        for predecessor in &predecessors {
            if let Some(succs) = self.forward.get_mut(predecessor) {
                succs.remove(vertex);
            }
        }
    }

    /// Remove the edge `from -> to`.
    ///
    /// Unknown endpoints and missing edges are ignored.
    pub fn remove_edge(&mut self, from: &V, to: &V) {
        if !(self.contains_vertex(from) && self.contains_vertex(to)) {
            return;
        }
        if let Some(succs) = self.forward.get_mut(from) {
            succs.remove(to);
        }
        if let Some(preds) = self.backward.get_mut(to) {
            preds.remove(from);
        }
    }

    /// All vertices, in no particular order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.forward.keys()
    }

    /// All edges as `(from, to)` pairs, in no particular order.
    pub fn edges(&self) -> impl Iterator<Item = (&V, &V)> {
        self.forward
            .iter()
            .flat_map(|(from, succs)| succs.iter().map(move |to| (from, to)))
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.forward.values().map(HashSet::len).sum()
    }

    /// Direct successors of `vertex`.
    pub fn successors(&self, vertex: &V) -> Result<&HashSet<V>, UnknownVertex> {
        self.forward.get(vertex).ok_or(UnknownVertex)
    }

    /// Direct predecessors of `vertex`.
    pub fn predecessors(&self, vertex: &V) -> Result<&HashSet<V>, UnknownVertex> {
        self.backward.get(vertex).ok_or(UnknownVertex)
    }

    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.forward.contains_key(vertex)
    }

    pub fn contains_edge(&self, from: &V, to: &V) -> bool {
        self.forward
            .get(from)
            .is_some_and(|succs| succs.contains(to))
    }

    /// Vertices without predecessors (sources).
    pub fn entries(&self) -> HashSet<&V> {
        Self::empty_keys(&self.backward)
    }

    /// Vertices without successors (sinks).
    pub fn exits(&self) -> HashSet<&V> {
        Self::empty_keys(&self.forward)
    }

    fn empty_keys(adjacency: &HashMap<V, HashSet<V>>) -> HashSet<&V> {
        adjacency
            .iter()
            .filter(|(_, neighbours)| neighbours.is_empty())
            .map(|(vertex, _)| vertex)
            .collect()
    }

    /// Every vertex with a path into `vertex`.
    ///
    /// `vertex` itself is only included when it lies on a cycle. Unknown
    /// vertices have no ancestors.
    pub fn ancestors(&self, vertex: &V) -> HashSet<&V> {
        let mut ancestors: HashSet<&V> = HashSet::new();
        let Some((start, _)) = self.backward.get_key_value(vertex) else {
            return ancestors;
        };

        let mut queue: VecDeque<&V> = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            for predecessor in &self.backward[current] {
                if ancestors.insert(predecessor) {
                    queue.push_back(predecessor);
                }
            }
        }
        ancestors
    }

    /// Delete every vertex not connected to `anchor`.
    ///
    /// Kept vertices are those reached by a breadth-first search from
    /// `anchor` that follows edges in both directions. With
    /// `keep_unreachable_siblings == false` every ancestor of `anchor` is
    /// marked kept before the search starts, so the search never expands
    /// through an ancestor: a branch that only joins the anchor's component
    /// through one of its ancestors is dropped. With `true` the result is the
    /// weakly-connected component of `anchor`.
    pub fn remove_disconnected_components(
        &mut self,
        anchor: &V,
        keep_unreachable_siblings: bool,
    ) -> Result<(), UnknownVertex> {
        let doomed: Vec<V> = {
            let (anchor, _) = self.forward.get_key_value(anchor).ok_or(UnknownVertex)?;

            let mut kept: HashSet<&V> = HashSet::from([anchor]);
            if !keep_unreachable_siblings {
                kept.extend(self.ancestors(anchor));
            }

            let mut queue: VecDeque<&V> = VecDeque::from([anchor]);
            while let Some(current) = queue.pop_front() {
                let neighbours = self.backward[current].iter().chain(&self.forward[current]);
                for neighbour in neighbours {
                    if kept.insert(neighbour) {
                        queue.push_back(neighbour);
                    }
                }
            }

            self.forward
                .keys()
                .filter(|vertex| !kept.contains(vertex))
                .cloned()
                .collect()
        };

        debug!(
            removed = doomed.len(),
            remaining = self.len() - doomed.len(),
            keep_unreachable_siblings,
            "pruning vertices disconnected from anchor"
        );

        for vertex in &doomed {
            self.remove_vertex(vertex);
        }
        Ok(())
    }

    /// Depth-first topological order: for every edge `u -> v` with both ends
    /// in the result, `u` comes first.
    ///
    /// The search starts only from entries, so on cyclic input this is a
    /// best-effort order: vertices reachable from an entry are all listed
    /// (edges closing a cycle are simply violated), while vertices that can
    /// only be reached from inside a source-free cycle are omitted.
    pub fn topological_order(&self) -> Vec<&V> {
        let mut visited: HashSet<&V> = HashSet::with_capacity(self.len());
        let mut finished: Vec<&V> = Vec::with_capacity(self.len());

        for entry in self.entries() {
            if !visited.insert(entry) {
                continue;
            }

            // Explicit stack of (vertex, remaining successors) instead of
            // recursion; visit order matches the recursive formulation.
            let mut stack: Vec<(&V, hash_set::Iter<'_, V>)> =
                vec![(entry, self.forward[entry].iter())];

            while let Some((vertex, successors)) = stack.last_mut() {
                match successors.find(|s| !visited.contains(s)) {
                    Some(next) => {
                        visited.insert(next);
                        stack.push((next, self.forward[next].iter()));
                    }
                    None => {
                        finished.push(*vertex);
                        stack.pop();
                    }
                }
            }
        }

        // Post-order pushed to the front is post-order reversed.
        finished.reverse();
        finished
    }
}
