/// Telemetry module
///
/// Initializes tracing/logging with structured output
use crate::config::TelemetryConfig;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. `RUST_LOG` wins over `telemetry.log_level`.
pub fn init_telemetry(config: &TelemetryConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.log_format.as_str() {
        "json" => registry
            .with(fmt::layer().json().flatten_event(true))
            .init(),
        "compact" => registry.with(fmt::layer().compact()).init(),
        other => {
            registry.with(fmt::layer().compact()).init();
            tracing::warn!(log_format = %other, "Unknown log format, using compact output");
        }
    }
}
