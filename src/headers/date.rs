//! HTTP date formatting and parsing.

use chrono::{DateTime, Utc};

use crate::constants::HTTP_DATE_FORMAT;

/// Format as a fixed-width IMF-fixdate with a literal `GMT` zone,
/// e.g. `Sun, 06 Nov 1994 08:49:37 GMT`.
pub fn format_http_date(at: DateTime<Utc>) -> String {
    at.format(HTTP_DATE_FORMAT).to_string()
}

/// Parse a client-supplied HTTP date.
///
/// Accepts the three RFC 9110 forms (IMF-fixdate, RFC 850, asctime) and falls
/// back to RFC 2822 so that numeric offsets like `+0000` are understood too.
/// Anything else yields `None`.
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    httpdate::parse_http_date(value)
        .ok()
        .map(DateTime::<Utc>::from)
        .or_else(|| {
            DateTime::parse_from_rfc2822(value)
                .ok()
                .map(|parsed| parsed.with_timezone(&Utc))
        })
}
