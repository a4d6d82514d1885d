//! Shared helpers for the `triggergraph` integration tests.

pub mod builders;

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt};

static TRACING: Once = Once::new();

/// Route `tracing` output through the test harness capture, once per binary.
///
/// The filter comes from `TRIGGERGRAPH_LOG`, then `RUST_LOG`, and defaults to
/// `debug` so a failing test shows the crawl and pruning events before it.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_env(triggergraph::logging::LOG_ENV)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
    });
}
