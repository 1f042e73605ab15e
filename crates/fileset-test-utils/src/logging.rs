//! Test-time subscriber for the `tracing` events the loader emits.

use tracing_subscriber::EnvFilter;

/// Install a compact fmt subscriber that writes through the test harness,
/// so output is captured per test and shown only on failure.
///
/// Filtered by `RUST_LOG`, e.g. `RUST_LOG=fileset_core=debug` to see
/// resolution steps and merged configs. Every fixture constructor calls
/// this; only the first call in a test binary installs anything.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .with_target(true)
        .compact()
        .try_init();
}
