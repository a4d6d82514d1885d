// src/triggers/workflow_graph.rs

use std::collections::{HashMap, HashSet};

use tracing::info;

use crate::dot;
use crate::errors::{Result, TriggerGraphError};
use crate::graph::{DirectedGraph, load_upstream};
use crate::model::JobRef;
use crate::registry::{Registry, WorkflowTriggers};

/// Trigger graph restricted to workflow jobs.
///
/// Built per request; callers that want fresh data construct a new one or
/// call [`WorkflowJobGraph::update`] on the one they own.
#[derive(Debug)]
pub struct WorkflowJobGraph<'r> {
    registry: &'r Registry,
    graph: DirectedGraph<JobRef>,
}

impl<'r> WorkflowJobGraph<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        let mut workflow_graph = Self {
            registry,
            graph: DirectedGraph::new(),
        };
        workflow_graph.update();
        workflow_graph
    }

    pub fn update(&mut self) {
        let registry = self.registry;
        let triggers = WorkflowTriggers(registry);
        self.graph.reset();

        for job in registry.jobs().filter(|job| job.is_workflow()) {
            load_upstream(&mut self.graph, job.clone(), &triggers);
        }

        info!(
            jobs = self.graph.len(),
            triggers = self.graph.edge_count(),
            "workflow job graph rebuilt"
        );
    }

    pub fn graph(&self) -> &DirectedGraph<JobRef> {
        &self.graph
    }

    /// Every workflow job mapped to the jobs that trigger it.
    pub fn upstream(&self) -> HashMap<&JobRef, &HashSet<JobRef>> {
        self.graph
            .vertices()
            .filter_map(|job| self.graph.predecessors(job).ok().map(|preds| (job, preds)))
            .collect()
    }

    pub fn upstream_of_job(&self, job: &JobRef) -> Result<&HashSet<JobRef>> {
        self.graph
            .predecessors(job)
            .map_err(|_| TriggerGraphError::JobNotFound(job.full_name().to_string()))
    }

    pub fn downstream_of_job(&self, job: &JobRef) -> Result<&HashSet<JobRef>> {
        self.graph
            .successors(job)
            .map_err(|_| TriggerGraphError::JobNotFound(job.full_name().to_string()))
    }

    pub fn entries(&self) -> HashSet<&JobRef> {
        self.graph.entries()
    }

    pub fn exits(&self) -> HashSet<&JobRef> {
        self.graph.exits()
    }

    /// Render as DOT. Jobs without upstream are also listed as bare
    /// statements so isolated jobs still show up.
    pub fn dot_string(&self, current: Option<&JobRef>) -> String {
        let settings = self.registry.settings();
        let mut dot =
            String::from("digraph { \n\tnode [shape=box, style=rounded, fontname=sans ];\n");

        let mut jobs: Vec<&JobRef> = self.graph.vertices().collect();
        jobs.sort();

        for job in jobs.iter() {
            let style = if current == Some(*job) {
                "rounded,filled"
            } else {
                "rounded"
            };
            let label = dot::table_label(&format!(
                "{}<td>{}</td>",
                dot::icon_cell(settings, job.icon_color()),
                dot::escape_html(job.display_name())
            ));
            dot.push_str(&format!(
                "\t{} [style=\"{}\", label=<{}>, href={}]; \n",
                dot::quote(job.full_name()),
                style,
                label,
                dot::quote(&job.absolute_url(&settings.root_url))
            ));
        }

        for target in jobs {
            let mut sources: Vec<&JobRef> = self
                .graph
                .predecessors(target)
                .map(|preds| preds.iter().collect())
                .unwrap_or_default();
            if sources.is_empty() {
                dot.push_str(&format!("\t{};\n", dot::quote(target.full_name())));
                continue;
            }
            sources.sort();
            for source in sources {
                dot.push_str(&format!(
                    "\t{}->{};\n",
                    dot::quote(source.full_name()),
                    dot::quote(target.full_name())
                ));
            }
        }

        dot.push('}');
        dot
    }
}
