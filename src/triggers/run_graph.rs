// src/triggers/run_graph.rs

use std::collections::HashSet;

use tracing::info;

use crate::dot;
use crate::graph::{DirectedGraph, load_upstream};
use crate::model::{RunRef, UpstreamCause};
use crate::registry::Registry;

/// Causation chain of a single run: every run that (transitively) caused
/// it, with an edge `upstream -> caused`.
#[derive(Debug)]
pub struct RunTriggerGraph<'r> {
    registry: &'r Registry,
    run: RunRef,
    graph: DirectedGraph<RunRef>,
}

impl<'r> RunTriggerGraph<'r> {
    pub fn new(registry: &'r Registry, run: RunRef) -> Self {
        let mut graph = DirectedGraph::new();
        load_upstream(&mut graph, run.clone(), registry);
        info!(
            run = %run,
            runs = graph.len(),
            causes = graph.edge_count(),
            "run trigger graph built"
        );
        Self {
            registry,
            run,
            graph,
        }
    }

    pub fn run(&self) -> &RunRef {
        &self.run
    }

    pub fn graph(&self) -> &DirectedGraph<RunRef> {
        &self.graph
    }

    /// First upstream cause of this run, `None` if nothing upstream started it.
    pub fn cause(&self) -> Option<&UpstreamCause> {
        self.registry.causes_of(&self.run).first()
    }

    /// Follow first causes upstream until a run without cause (or a run that
    /// no longer exists) is reached. The nearest cause comes first.
    pub fn upstream_causes(&self) -> Vec<UpstreamCause> {
        let mut causes = Vec::new();
        let mut seen: HashSet<&UpstreamCause> = HashSet::new();
        let mut next = self.cause();

        while let Some(cause) = next {
            if !seen.insert(cause) {
                break;
            }
            causes.push(cause.clone());
            next = self
                .registry
                .run(&cause.job, cause.number)
                .and_then(|upstream| self.registry.causes_of(upstream).first());
        }

        causes
    }

    /// Render the chain as DOT, upstream runs at the bottom.
    pub fn dot(&self) -> String {
        let settings = self.registry.settings();
        let mut dot = format!(
            "digraph {} {{\n\tnode [shape=box, style=rounded, fontname=sans];\n\tgraph [rankdir=BT]; \n",
            dot::quote(&self.run.full_display_name())
        );

        let mut runs: Vec<&RunRef> = self.graph.vertices().collect();
        runs.sort();
        for run in runs {
            let name = run.full_display_name();
            let label = dot::table_label(&format!(
                "{}<td>{}</td>",
                dot::icon_cell(settings, run.icon_color()),
                dot::escape_html(&name)
            ));
            dot.push_str(&format!("\t{} [label=<{}>];\n", dot::quote(&name), label));
        }

        let mut edges: Vec<(&RunRef, &RunRef)> = self.graph.edges().collect();
        edges.sort();
        for (upstream, caused) in edges {
            dot.push_str(&format!(
                "\t{} -> {};\n",
                dot::quote(&upstream.full_display_name()),
                dot::quote(&caused.full_display_name())
            ));
        }

        dot.push('}');
        dot
    }
}
