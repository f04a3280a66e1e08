// This crate contains testing utilities which need to be shared across multiple
// crates in this project.
use tracing_subscriber::EnvFilter;

/// A reference model of the double-rounding computation used to observe
/// the working precision
pub mod double_rounding;
/// `proptest` strategies over raw control words and field masks
pub mod strategies;

/// Send tracing events, and `log` records converted to them, to the test
/// output, filtered by `RUST_LOG`. Safe to call from every test; only the
/// first call installs the subscriber.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
