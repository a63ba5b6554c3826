//! Telemetry helpers for structured logging.

/// Install a default `tracing` subscriber if the host application has not
/// set one. The filter comes from `RUST_LOG`; the scheduler emits submit,
/// lifecycle, and task-outcome events through `tracing`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
