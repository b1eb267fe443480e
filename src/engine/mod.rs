//! Header decision engine.
//!
//! Pure functions from a [`ResourceDescriptor`], a [`HeaderConfig`] and the
//! client's [`RequestValidators`] to an outgoing [`HeaderSet`] and a
//! [`ShortCircuitDecision`]. Nothing here touches a response; see
//! [`crate::pipeline`] for that.
//!
//! # Example
//!
//! ```rust
//! use cache_validators::config::HeaderConfig;
//! use cache_validators::engine::{
//!     build_headers, evaluate_preconditions, RequestValidators, ResourceDescriptor,
//!     ShortCircuitDecision,
//! };
//! use cache_validators::headers::HeaderName;
//! use chrono::{TimeZone, Utc};
//!
//! let descriptor = ResourceDescriptor::new(
//!     1,
//!     "https://example.com/?p=1",
//!     "2024-01-01 00:00:00",
//!     Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
//! );
//! let config = HeaderConfig::default();
//! let headers = build_headers(&descriptor, &config, Utc::now());
//!
//! let etag = headers.get(HeaderName::ETag).unwrap().to_string();
//! let validators = RequestValidators::new().with_if_none_match(etag);
//! let decision = evaluate_preconditions(&headers, &validators, descriptor.modified_at, &config);
//! assert!(decision.is_not_modified());
//! ```
//!
//! [`HeaderConfig`]: crate::config::HeaderConfig
//! [`HeaderSet`]: crate::headers::HeaderSet

mod build;
mod conditional;
mod etag;
mod types;

pub use build::build_headers;
pub use conditional::{evaluate_preconditions, strip_backslashes};
pub use etag::{compute_etag, etag_material, format_etag};
pub use types::{RequestValidators, ResourceDescriptor, ShortCircuitDecision, Validator};
