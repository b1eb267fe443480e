//! Header set construction.

use chrono::{DateTime, Duration, Utc};

use crate::config::HeaderConfig;
use crate::constants::{PRAGMA_NO_CACHE, PRAGMA_PUBLIC};
use crate::headers::{format_http_date, HeaderName, HeaderSet};

use super::etag::compute_etag;
use super::types::ResourceDescriptor;

/// Build the enabled caching headers for one response.
///
/// `now` anchors `Expires`; it is a parameter so callers control the clock.
/// Only headers switched on in `config` are present in the result.
pub fn build_headers(
    descriptor: &ResourceDescriptor,
    config: &HeaderConfig,
    now: DateTime<Utc>,
) -> HeaderSet {
    let mut headers = HeaderSet::new();

    if config.add_etag_header {
        headers.insert(HeaderName::ETag, compute_etag(descriptor, config));
    }

    if config.add_last_modified_header {
        headers.insert(
            HeaderName::LastModified,
            format_http_date(descriptor.modified_at),
        );
    }

    if config.add_expires_header {
        headers.insert(
            HeaderName::Expires,
            format_http_date(expires_at(now, config.cache_max_age_seconds)),
        );
    }

    if config.add_backwards_cache_control {
        headers.insert(HeaderName::Pragma, pragma_value(config.cache_max_age_seconds));
    }

    headers
}

/// `now + max_age`, independent of the resource's own age.
///
/// A sum chrono cannot represent falls back to `now`.
fn expires_at(now: DateTime<Utc>, max_age_seconds: u64) -> DateTime<Utc> {
    i64::try_from(max_age_seconds)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|max_age| now.checked_add_signed(max_age))
        .unwrap_or(now)
}

fn pragma_value(max_age_seconds: u64) -> &'static str {
    if max_age_seconds > 0 {
        PRAGMA_PUBLIC
    } else {
        PRAGMA_NO_CACHE
    }
}
