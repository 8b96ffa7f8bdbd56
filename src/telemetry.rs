use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log filter '{filter}': {source}")]
    InvalidFilter {
        filter: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("tracing subscriber already initialized")]
    AlreadyInitialized,
}

/// Pick the filter directive: RUST_LOG, then `--verbose`, then the config level.
pub fn filter_directive(env_filter: Option<&str>, config_level: &str, verbose: bool) -> String {
    match env_filter {
        Some(filter) if !filter.trim().is_empty() => filter.to_string(),
        _ if verbose => "debug".to_string(),
        _ => config_level.to_string(),
    }
}

/// Install the global subscriber. Logs go to stderr so stdout stays usable for reports.
pub fn init(config_level: &str, verbose: bool) -> Result<(), TelemetryError> {
    let env_value = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = filter_directive(env_value.as_deref(), config_level, verbose);

    let filter = EnvFilter::try_new(&directive).map_err(|source| TelemetryError::InvalidFilter {
        filter: directive.clone(),
        source,
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|_| TelemetryError::AlreadyInitialized)
}
