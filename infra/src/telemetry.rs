//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use mg_shared::config::{LogFormat, LoggingConfig};

use crate::InfrastructureError;

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over `config.level`. Fails if a global
/// subscriber is already set.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), InfrastructureError> {
    let filter = build_filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
    result.map_err(|e| InfrastructureError::Telemetry(e.to_string()))
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, InfrastructureError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| InfrastructureError::Telemetry(format!("Invalid log filter: {}", e)))
}
