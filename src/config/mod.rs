// Configuration module

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::*;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub headers: HeaderConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Header policy consumed by the engine.
///
/// Every field is optional in YAML; missing fields take the defaults from
/// `constants`. The policy may be replaced per request by the
/// `cache_validators.defaults` hook before it reaches the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderConfig {
    /// Emit ETag
    #[serde(default = "default_add_etag_header")]
    pub add_etag_header: bool,

    /// Prefix the ETag with `W/`
    #[serde(default = "default_generate_weak_etag")]
    pub generate_weak_etag: bool,

    /// Emit Last-Modified
    #[serde(default = "default_add_last_modified_header")]
    pub add_last_modified_header: bool,

    /// Emit Expires (now + cache_max_age_seconds)
    #[serde(default = "default_add_expires_header")]
    pub add_expires_header: bool,

    /// Emit Pragma for HTTP/1.0 clients
    #[serde(default = "default_add_backwards_cache_control")]
    pub add_backwards_cache_control: bool,

    /// Drives the Expires offset and the Pragma policy
    #[serde(default = "default_cache_max_age_seconds")]
    pub cache_max_age_seconds: u64,

    /// Reserved. Accepted for compatibility, has no effect.
    #[serde(default = "default_remove_pre_existing_headers")]
    pub remove_pre_existing_headers: bool,

    /// true: send 304 as a raw `HTTP/1.1 304 Not Modified` status line.
    /// false: use the response's structured status setter when it has one.
    #[serde(default = "default_nginx_http_code")]
    pub nginx_http_code: bool,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            add_etag_header: default_add_etag_header(),
            generate_weak_etag: default_generate_weak_etag(),
            add_last_modified_header: default_add_last_modified_header(),
            add_expires_header: default_add_expires_header(),
            add_backwards_cache_control: default_add_backwards_cache_control(),
            cache_max_age_seconds: default_cache_max_age_seconds(),
            remove_pre_existing_headers: default_remove_pre_existing_headers(),
            nginx_http_code: default_nginx_http_code(),
        }
    }
}

fn default_add_etag_header() -> bool {
    DEFAULT_ADD_ETAG_HEADER
}

fn default_generate_weak_etag() -> bool {
    DEFAULT_GENERATE_WEAK_ETAG
}

fn default_add_last_modified_header() -> bool {
    DEFAULT_ADD_LAST_MODIFIED_HEADER
}

fn default_add_expires_header() -> bool {
    DEFAULT_ADD_EXPIRES_HEADER
}

fn default_add_backwards_cache_control() -> bool {
    DEFAULT_ADD_BACKWARDS_CACHE_CONTROL
}

fn default_cache_max_age_seconds() -> u64 {
    DEFAULT_CACHE_MAX_AGE_SECONDS
}

fn default_remove_pre_existing_headers() -> bool {
    DEFAULT_REMOVE_PRE_EXISTING_HEADERS
}

fn default_nginx_http_code() -> bool {
    DEFAULT_NGINX_HTTP_CODE
}

impl HeaderConfig {
    /// Validate header policy
    pub fn validate(&self) -> Result<()> {
        if self.cache_max_age_seconds > MAX_CACHE_MAX_AGE_SECONDS {
            return Err(Error::ConfigInvalid(format!(
                "cache_max_age_seconds ({}) cannot exceed {}",
                self.cache_max_age_seconds, MAX_CACHE_MAX_AGE_SECONDS
            )));
        }
        Ok(())
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Filter used when RUST_LOG is not set (default: info)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format (default: text)
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<()> {
        let level = self.level.to_lowercase();
        if !VALID_LOG_LEVELS.contains(&level.as_str()) {
            return Err(Error::ConfigInvalid(format!(
                "Invalid logging level '{}'. Supported levels: {}",
                self.level,
                VALID_LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }
}

impl Config {
    pub fn from_yaml_with_env(yaml: &str) -> Result<Self> {
        // Replace ${VAR_NAME} with environment variable values
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| Error::ConfigInvalid(e.to_string()))?;

        // First, check that all referenced environment variables exist
        for caps in re.captures_iter(yaml) {
            let var_name = &caps[1];
            if std::env::var(var_name).is_err() {
                return Err(Error::MissingEnvVar(var_name.to_string()));
            }
        }

        let substituted = re.replace_all(yaml, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_default()
        });

        let config: Config = serde_yaml::from_str(&substituted)?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_with_env(&yaml)
    }

    pub fn validate(&self) -> Result<()> {
        self.headers.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
