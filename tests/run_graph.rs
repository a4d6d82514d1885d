mod common;
use crate::common::builders::{RegistryBuilder, RunConfigBuilder};
use crate::common::{init_tracing, owned};

use std::collections::HashSet;
use std::error::Error;

use triggergraph::model::{BallColor, RunRef, UpstreamCause};
use triggergraph::registry::Registry;
use triggergraph::triggers::RunTriggerGraph;

type TestResult = Result<(), Box<dyn Error>>;

fn chain() -> Registry {
    RegistryBuilder::new()
        .workflow("a", "")
        .workflow("b", "a")
        .workflow("c", "b")
        .with_run(RunConfigBuilder::new("a", 1).build())
        .with_run(RunConfigBuilder::new("b", 2).caused_by("a", 1).build())
        .with_run(
            RunConfigBuilder::new("c", 3)
                .caused_by("b", 2)
                .color(BallColor::Red)
                .build(),
        )
        .build()
}

fn cause(job: &str, number: u32) -> UpstreamCause {
    UpstreamCause {
        job: job.to_string(),
        number,
    }
}

#[test]
fn graph_follows_causes_upstream() -> TestResult {
    init_tracing();
    let registry = chain();
    let run = registry.require_run("c", 3)?.clone();
    let graph = RunTriggerGraph::new(&registry, run);

    assert_eq!(
        owned(graph.graph().vertices()),
        HashSet::from([RunRef::new("a", 1), RunRef::new("b", 2), RunRef::new("c", 3)])
    );
    assert!(graph.graph().contains_edge(&RunRef::new("a", 1), &RunRef::new("b", 2)));
    assert!(graph.graph().contains_edge(&RunRef::new("b", 2), &RunRef::new("c", 3)));
    assert_eq!(graph.graph().edge_count(), 2);
    Ok(())
}

#[test]
fn first_cause_and_cause_chain() -> TestResult {
    let registry = chain();
    let run = registry.require_run("c", 3)?.clone();
    let graph = RunTriggerGraph::new(&registry, run);

    assert_eq!(graph.cause(), Some(&cause("b", 2)));
    assert_eq!(graph.upstream_causes(), vec![cause("b", 2), cause("a", 1)]);
    Ok(())
}

#[test]
fn run_without_causes_is_alone() -> TestResult {
    let registry = chain();
    let run = registry.require_run("a", 1)?.clone();
    let graph = RunTriggerGraph::new(&registry, run.clone());

    assert_eq!(owned(graph.graph().vertices()), HashSet::from([run]));
    assert_eq!(graph.cause(), None);
    assert!(graph.upstream_causes().is_empty());
    Ok(())
}

#[test]
fn missing_upstream_run_ends_the_chain() -> TestResult {
    let registry = RegistryBuilder::new()
        .workflow("a", "")
        .workflow("b", "a")
        .with_run(RunConfigBuilder::new("b", 5).caused_by("a", 99).build())
        .build();

    let run = registry.require_run("b", 5)?.clone();
    let graph = RunTriggerGraph::new(&registry, run.clone());

    assert_eq!(owned(graph.graph().vertices()), HashSet::from([run]));
    assert_eq!(graph.upstream_causes(), vec![cause("a", 99)]);
    Ok(())
}

#[test]
fn shared_upstream_run_appears_once() -> TestResult {
    let registry = RegistryBuilder::new()
        .workflow("a", "")
        .workflow("b", "a")
        .workflow("c", "a")
        .workflow("d", "b, c")
        .with_run(RunConfigBuilder::new("a", 1).build())
        .with_run(RunConfigBuilder::new("b", 1).caused_by("a", 1).build())
        .with_run(RunConfigBuilder::new("c", 1).caused_by("a", 1).build())
        .with_run(
            RunConfigBuilder::new("d", 1)
                .caused_by("b", 1)
                .caused_by("c", 1)
                .build(),
        )
        .build();

    let run = registry.require_run("d", 1)?.clone();
    let graph = RunTriggerGraph::new(&registry, run);

    assert_eq!(graph.graph().len(), 4);
    assert_eq!(graph.graph().edge_count(), 4);
    assert_eq!(
        graph.graph().predecessors(&RunRef::new("d", 1))?,
        &HashSet::from([RunRef::new("b", 1), RunRef::new("c", 1)])
    );
    assert_eq!(graph.upstream_causes(), vec![cause("b", 1), cause("a", 1)]);
    Ok(())
}

#[test]
fn run_identity_is_job_and_number() {
    assert_eq!(
        RunRef::new("a", 1),
        RunRef::new("a", 1).with_color(BallColor::Blue)
    );
    assert_ne!(RunRef::new("a", 1), RunRef::new("a", 2));
    assert_ne!(RunRef::new("a", 1), RunRef::new("b", 1));
    assert_eq!(RunRef::new("a", 7).full_display_name(), "a #7");
}

#[test]
fn dot_lists_runs_bottom_up() -> TestResult {
    let registry = chain();
    let run = registry.require_run("c", 3)?.clone();
    let dot = RunTriggerGraph::new(&registry, run).dot();

    assert!(dot.starts_with("digraph \"c #3\" {\n"));
    assert!(dot.contains("graph [rankdir=BT];"));
    assert!(dot.contains("\t\"a #1\" [label=<"));
    assert!(dot.contains("\t\"a #1\" -> \"b #2\";\n"));
    assert!(dot.contains("\t\"b #2\" -> \"c #3\";\n"));
    assert!(dot.ends_with('}'));
    Ok(())
}

#[test]
fn dot_draws_status_icons_when_enabled() -> TestResult {
    let registry = RegistryBuilder::new()
        .workflow("c", "")
        .with_run(RunConfigBuilder::new("c", 3).color(BallColor::Red).build())
        .settings(|s| s.draw_balls = true)
        .build();

    let run = registry.require_run("c", 3)?.clone();
    let dot = RunTriggerGraph::new(&registry, run).dot();
    assert!(dot.contains("<img src=\"red.png\" />"));
    Ok(())
}
