// Logging tests
//
// The global subscriber can only be installed once per process, so both
// the first installation and the rejected second one live in one test.

use cache_validators::config::{LogFormat, LoggingConfig};
use cache_validators::logging::init_subscriber;

#[test]
fn test_subscriber_installs_once() {
    let config = LoggingConfig {
        level: "debug".to_string(),
        format: LogFormat::Json,
    };

    assert!(init_subscriber(&config).is_ok());
    tracing::info!(test = "logging", "subscriber installed");

    let second = init_subscriber(&LoggingConfig::default());
    assert!(second.is_err());
}
