//! Extension points.
//!
//! Two ordered filter chains let embedding code adjust behaviour per request
//! without global state:
//! - `cache_validators.defaults`: `HeaderConfig -> HeaderConfig`, run before
//!   the engine
//! - `cache_validators.send`: `HeaderSet -> HeaderSet`, run after headers are
//!   built and before they are written
//!
//! Filters run in registration order, each receiving the previous output.

use std::fmt;

use crate::config::HeaderConfig;
use crate::constants::{CONFIG_HOOK, HEADERS_HOOK};
use crate::headers::HeaderSet;

pub type ConfigFilter = Box<dyn Fn(HeaderConfig) -> HeaderConfig + Send + Sync>;
pub type HeaderFilter = Box<dyn Fn(HeaderSet) -> HeaderSet + Send + Sync>;

#[derive(Default)]
pub struct Hooks {
    config_filters: Vec<ConfigFilter>,
    header_filters: Vec<HeaderFilter>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Hooks::add_config_filter`]
    pub fn on_config<F>(mut self, filter: F) -> Self
    where
        F: Fn(HeaderConfig) -> HeaderConfig + Send + Sync + 'static,
    {
        self.add_config_filter(filter);
        self
    }

    /// Builder form of [`Hooks::add_header_filter`]
    pub fn on_headers<F>(mut self, filter: F) -> Self
    where
        F: Fn(HeaderSet) -> HeaderSet + Send + Sync + 'static,
    {
        self.add_header_filter(filter);
        self
    }

    pub fn add_config_filter<F>(&mut self, filter: F)
    where
        F: Fn(HeaderConfig) -> HeaderConfig + Send + Sync + 'static,
    {
        self.config_filters.push(Box::new(filter));
    }

    pub fn add_header_filter<F>(&mut self, filter: F)
    where
        F: Fn(HeaderSet) -> HeaderSet + Send + Sync + 'static,
    {
        self.header_filters.push(Box::new(filter));
    }

    pub fn apply_config(&self, config: HeaderConfig) -> HeaderConfig {
        if self.config_filters.is_empty() {
            return config;
        }
        tracing::trace!(
            hook = CONFIG_HOOK,
            filters = self.config_filters.len(),
            "Applying config filters"
        );
        self.config_filters
            .iter()
            .fold(config, |config, filter| filter(config))
    }

    pub fn apply_headers(&self, headers: HeaderSet) -> HeaderSet {
        if self.header_filters.is_empty() {
            return headers;
        }
        tracing::trace!(
            hook = HEADERS_HOOK,
            filters = self.header_filters.len(),
            "Applying header filters"
        );
        self.header_filters
            .iter()
            .fold(headers, |headers, filter| filter(headers))
    }

    pub fn is_empty(&self) -> bool {
        self.config_filters.is_empty() && self.header_filters.is_empty()
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("config_filters", &self.config_filters.len())
            .field("header_filters", &self.header_filters.len())
            .finish()
    }
}
