// Cache Validators Library
// Conditional caching headers (ETag, Last-Modified, Expires, Pragma) and 304 short-circuits

pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod headers;
pub mod hooks;
pub mod logging;
pub mod pipeline;
pub mod resolver;

pub use error::{Error, Result};
