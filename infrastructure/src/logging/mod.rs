//! Logging infrastructure — tracing setup and the JSONL intervention log.
//!
//! Provides [`JsonlInterventionLog`], a JSONL file writer that implements
//! the [`InterventionLog`](icgl_application::InterventionLog) port, and
//! [`init_tracing`] for host processes.

mod jsonl_logger;

pub use jsonl_logger::JsonlInterventionLog;

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// The filter is taken from the `ICGL_LOG` environment variable, falling
/// back to the given default directive (e.g. `"info"`). Safe to call once
/// per process; later calls are ignored.
pub fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_env("ICGL_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
