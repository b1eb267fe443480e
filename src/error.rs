//! Error types for configuration, fixtures and logging setup
//!
//! The header engine itself never fails: every condition it meets is a policy
//! branch. Errors only come from loading things from disk or the environment.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for fallible crate operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Environment variable '{0}' is referenced but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error("Failed to parse request fixture: {0}")]
    Fixture(#[from] serde_json::Error),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}
