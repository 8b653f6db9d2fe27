//! Cross-layer integration tests for Voxecute
//!
//! Tests that verify correct interaction between multiple crates.

mod host;

use tracing_subscriber::EnvFilter;

/// Routes engine logs to the test harness; `RUST_LOG` picks the level.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("voxecute=debug")),
        )
        .try_init();
}
