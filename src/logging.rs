//! Diagnostic logging with `tracing`.
//!
//! User-facing output is printed directly; this only covers diagnostics on stderr.
//! `RUST_LOG` overrides the level picked from `-v`.

use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count
fn filter_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber. A second call is a no-op.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
