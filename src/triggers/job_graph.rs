// src/triggers/job_graph.rs

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::dot::{self, DISABLED_NODE_COLOR, NODE_COLOR};
use crate::errors::{Result, TriggerGraphError};
use crate::graph::{DirectedGraph, load_upstream, path_counts};
use crate::model::JobRef;
use crate::registry::Registry;

/// Trigger graph over every job in the registry.
///
/// An edge `a -> b` means "a finishing triggers b". The graph is rebuilt
/// from scratch by [`JobGraph::update`]; there is no incremental
/// maintenance.
#[derive(Debug)]
pub struct JobGraph<'r> {
    registry: &'r Registry,
    graph: DirectedGraph<JobRef>,
    trigger_counts: HashMap<JobRef, u64>,
}

impl<'r> JobGraph<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        let mut job_graph = Self {
            registry,
            graph: DirectedGraph::new(),
            trigger_counts: HashMap::new(),
        };
        job_graph.update();
        job_graph
    }

    /// Reload every job's upstream from the registry.
    pub fn update(&mut self) {
        let registry = self.registry;
        self.graph.reset();

        for job in registry.jobs() {
            load_upstream(&mut self.graph, job.clone(), registry);
        }

        self.trigger_counts = if registry.settings().count_triggers_transitively {
            path_counts(&self.graph)
        } else {
            HashMap::new()
        };

        info!(
            jobs = self.graph.len(),
            triggers = self.graph.edge_count(),
            "job graph rebuilt"
        );
    }

    /// Drop every job not connected to `job`.
    ///
    /// With `linear_upstream_of_project` set only the direct upstream line
    /// and the downstream side are kept, otherwise the whole weakly-connected
    /// component.
    pub fn remove_unconnected_nodes(&mut self, job: &JobRef) -> Result<()> {
        let keep_siblings = self.registry.settings().keep_unreachable_siblings();
        self.graph
            .remove_disconnected_components(job, keep_siblings)
            .map_err(|_| not_found(job))?;
        debug!(job = %job, remaining = self.graph.len(), "pruned job graph");
        Ok(())
    }

    pub fn graph(&self) -> &DirectedGraph<JobRef> {
        &self.graph
    }

    pub fn jobs(&self) -> impl Iterator<Item = &JobRef> {
        self.graph.vertices()
    }

    /// Jobs that trigger `job`.
    pub fn upstream_of_job(&self, job: &JobRef) -> Result<&HashSet<JobRef>> {
        self.graph.predecessors(job).map_err(|_| not_found(job))
    }

    /// Jobs triggered by `job`.
    pub fn downstream_of_job(&self, job: &JobRef) -> Result<&HashSet<JobRef>> {
        self.graph.successors(job).map_err(|_| not_found(job))
    }

    pub fn entries(&self) -> HashSet<&JobRef> {
        self.graph.entries()
    }

    pub fn exits(&self) -> HashSet<&JobRef> {
        self.graph.exits()
    }

    /// Path counts computed by the last [`JobGraph::update`]; empty unless
    /// `count_triggers_transitively` is set.
    pub fn total_trigger_count(&self) -> &HashMap<JobRef, u64> {
        &self.trigger_counts
    }

    /// How many trigger paths lead to `job`. Jobs that only hang off a
    /// source-free cycle have no computed count and report 1.
    pub fn trigger_count(&self, job: &JobRef) -> u64 {
        self.trigger_counts.get(job).copied().unwrap_or(1)
    }

    /// Render the graph as DOT, highlighting `current` and its edges.
    pub fn dot_string(&self, current: Option<&JobRef>) -> String {
        let settings = self.registry.settings();
        let mut dot = format!(
            "digraph {{ \n\tnode [shape=box, style=rounded, fontname=sans ];\n\tgraph [rankdir={}]; \n",
            settings.rankdir()
        );

        let mut jobs: Vec<&JobRef> = self
            .graph
            .vertices()
            .filter(|job| self.is_job_visible(job))
            .collect();
        jobs.sort();
        for job in jobs {
            dot.push_str(&self.dot_node(job, current));
        }

        let mut edges: Vec<(&JobRef, &JobRef)> = self
            .graph
            .edges()
            .filter(|(source, target)| self.is_job_visible(source) && self.is_job_visible(target))
            .collect();
        edges.sort();
        for (source, target) in edges {
            dot.push_str(&self.dot_edge(source, target, current));
        }

        dot.push('}');
        dot
    }

    fn dot_node(&self, job: &JobRef, current: Option<&JobRef>) -> String {
        let settings = self.registry.settings();
        let is_current = current == Some(job);

        let style = if is_current { "rounded,filled" } else { "rounded" };
        let count = if settings.count_triggers_transitively {
            format!("<td>({})</td>", self.trigger_count(job))
        } else {
            String::new()
        };
        let label = dot::table_label(&format!(
            "{}<td>{}</td>{}",
            dot::icon_cell(settings, job.icon_color()),
            dot::escape_html(job.full_name()),
            count
        ));
        let href = format!("{}triggers/", job.absolute_url(&settings.root_url));
        let color = if job.is_disabled() || is_current {
            DISABLED_NODE_COLOR
        } else {
            NODE_COLOR
        };
        let fontcolor = if job.is_disabled() && !is_current {
            DISABLED_NODE_COLOR
        } else {
            NODE_COLOR
        };

        format!(
            "\t{} [style=\"{}\", label=<{}>, href={}, color=\"{}\", fontcolor=\"{}\"]; \n",
            dot::quote(job.full_name()),
            style,
            label,
            dot::quote(&href),
            color,
            fontcolor
        )
    }

    fn dot_edge(&self, source: &JobRef, target: &JobRef, current: Option<&JobRef>) -> String {
        let color = if source.is_disabled() || target.is_disabled() {
            DISABLED_NODE_COLOR
        } else {
            NODE_COLOR
        };
        let width = if current == Some(source) || current == Some(target) {
            self.registry.settings().selected_edge_width
        } else {
            1
        };
        format!(
            "\t{} -> {} [color=\"{}\", penwidth=\"{}\"]; \n",
            dot::quote(source.full_name()),
            dot::quote(target.full_name()),
            color,
            width
        )
    }

    /// Disabled jobs are drawn unless `hide_disabled` is set.
    fn is_job_visible(&self, job: &JobRef) -> bool {
        !job.is_disabled() || !self.registry.settings().hide_disabled
    }
}

fn not_found(job: &JobRef) -> TriggerGraphError {
    TriggerGraphError::JobNotFound(job.full_name().to_string())
}
