//! Diagnostic tracing for the command-line adapter.
//!
//! Diagnostics go to stderr so that stdout carries only the combat report.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// Reads `RUST_LOG` and falls back to `warn` when it is unset or invalid.
///
/// ```bash
/// RUST_LOG=skirmish_system_combat=debug skirmish maps/sample.txt
/// ```
pub(crate) fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
