// Logging module for structured logging using the tracing crate

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};
use crate::error::{Error, Result};

/// Initialize the tracing subscriber for structured logging
///
/// The subscriber is configured with:
/// - `RUST_LOG` filtering, falling back to `logging.level` from the config
/// - Text or JSON formatting depending on `logging.format`
/// - Output to stderr so CLI output on stdout stays machine readable
///
/// # Errors
///
/// Returns an error if the filter is invalid or a global subscriber has
/// already been installed.
///
/// # Examples
///
/// ```
/// use cache_validators::config::LoggingConfig;
/// use cache_validators::logging::init_subscriber;
///
/// init_subscriber(&LoggingConfig::default()).expect("Failed to initialize logging");
/// tracing::info!("Application started");
/// ```
pub fn init_subscriber(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| Error::Logging(e.to_string()))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };

    result.map_err(|e| Error::Logging(e.to_string()))
}
