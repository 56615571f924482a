//! Structured JSON logging setup using tracing.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber with JSON output.
///
/// `RUST_LOG` takes precedence over the configured filter directive.
///
/// # Panics
///
/// Panics if a global subscriber has already been installed.
pub fn init_logging(filter: &str) {
    let filter_layer = match EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(filter))
    {
        Ok(filter) => filter,
        Err(error) => {
            eprintln!("FATAL: failed to create log filter: {error}");
            std::process::exit(1);
        }
    };

    let fmt_layer = fmt::layer()
        .json()
        .with_target(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter_layer)
        .init();

    tracing::info!(filter = %filter, "logging initialized");
}
