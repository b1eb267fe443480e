//! Conditional request evaluation (If-None-Match, If-Modified-Since).

use chrono::{DateTime, Utc};

use crate::config::HeaderConfig;
use crate::headers::{parse_http_date, HeaderName, HeaderSet};

use super::types::{RequestValidators, ShortCircuitDecision, Validator};

/// Decide whether the client's cached copy is still current.
///
/// The ETag check runs first. A validator is only consulted when the
/// matching header is enabled in `config`, and the ETag compared is the one
/// in `headers` (after any header hook ran), not a freshly computed one.
///
/// - If-None-Match: exact string comparison after backslash unescaping,
///   quotes and `W/` included. No list parsing, no weak comparison.
/// - If-Modified-Since: second-resolution `>=` against `mtime`; an
///   unparseable date never matches.
pub fn evaluate_preconditions(
    headers: &HeaderSet,
    validators: &RequestValidators,
    mtime: DateTime<Utc>,
    config: &HeaderConfig,
) -> ShortCircuitDecision {
    if config.add_etag_header {
        if let (Some(client_etag), Some(etag)) = (
            validators.if_none_match.as_deref(),
            headers.get(HeaderName::ETag),
        ) {
            if strip_backslashes(client_etag) == etag {
                return ShortCircuitDecision::NotModified(Validator::ETag);
            }
        }
    }

    if config.add_last_modified_header {
        if let Some(since) = validators.if_modified_since.as_deref() {
            match parse_http_date(since) {
                Some(since) if since.timestamp() >= mtime.timestamp() => {
                    return ShortCircuitDecision::NotModified(Validator::LastModified);
                }
                Some(_) => {}
                None => {
                    tracing::debug!(
                        if_modified_since = %since,
                        "Ignoring unparseable If-Modified-Since"
                    );
                }
            }
        }
    }

    ShortCircuitDecision::Proceed
}

/// Remove backslash escaping: `\x` becomes `x`, `\\` becomes `\`, a
/// trailing lone backslash is dropped.
pub fn strip_backslashes(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}
