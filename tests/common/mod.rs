#![allow(dead_code, unused_imports)]

pub use triggergraph_test_utils::builders;
pub use triggergraph_test_utils::init_tracing;

use std::collections::HashSet;
use std::hash::Hash;

/// Clone borrowed vertices into an owned set so they compare against literals.
pub fn owned<'a, V>(vertices: impl IntoIterator<Item = &'a V>) -> HashSet<V>
where
    V: Eq + Hash + Clone + 'a,
{
    vertices.into_iter().cloned().collect()
}

/// Full names of the given jobs, for compact assertions.
pub fn names<'a>(
    jobs: impl IntoIterator<Item = &'a triggergraph::model::JobRef>,
) -> HashSet<String> {
    jobs.into_iter().map(|job| job.full_name().to_string()).collect()
}

pub fn name_set(names: &[&str]) -> HashSet<String> {
    names.iter().map(|name| name.to_string()).collect()
}
