//! Tracing subscriber initialisation.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_FILTER_ENV: &str = "WORKLOG_LOG";

/// Failure to install the global subscriber.
#[derive(Debug, Error)]
#[error("failed to initialise tracing subscriber: {0}")]
pub struct TelemetryInitError(String);

/// Installs a formatting subscriber filtered by `WORKLOG_LOG`, or by
/// `default_filter` when the variable is unset or invalid.
///
/// # Errors
///
/// Returns [`TelemetryInitError`] when a global subscriber is already set.
pub fn init_tracing(default_filter: &str) -> Result<(), TelemetryInitError> {
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| TelemetryInitError(err.to_string()))
}
