//! Tracing setup for the binary.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Filtered by `SVGSCOUT_LOG` (default
/// `warn`) and written to stderr so the TUI on stdout stays clean. Safe to
/// call once per process; later calls are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_env("SVGSCOUT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
