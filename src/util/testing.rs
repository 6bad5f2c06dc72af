//! Test bootstrap and fixtures shared by unit and integration tests

use std::env;
use std::sync::Once;

use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::Node;

static TEST_SETUP: Once = Once::new();

/// Install the test subscriber once per process; `RUST_LOG` overrides the
/// default `sbtree=debug` filter.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    let filter = env::var("RUST_LOG").unwrap_or_else(|_| "sbtree=debug".to_string());
    let env_filter = EnvFilter::try_new(&filter).unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// `m/n`, panicking on invalid input.
pub fn node(m: i64, n: i64) -> Node {
    match Node::new(m, n) {
        Ok(node) => node,
        Err(e) => panic!("bad fixture {m}/{n}: {e}"),
    }
}

pub fn nodes(pairs: &[(i64, i64)]) -> Vec<Node> {
    pairs.iter().map(|&(m, n)| node(m, n)).collect()
}
