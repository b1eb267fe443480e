// Constants module - centralized default values and wire strings
//
// Header names, date layouts and configuration defaults live here so the
// engine, the resolver and the CLI agree on a single spelling of each.

// =============================================================================
// Header policy defaults
// =============================================================================

/// ETag emission is on unless configured otherwise
pub const DEFAULT_ADD_ETAG_HEADER: bool = true;

/// Strong validators by default
pub const DEFAULT_GENERATE_WEAK_ETAG: bool = false;

/// Last-Modified emission is on unless configured otherwise
pub const DEFAULT_ADD_LAST_MODIFIED_HEADER: bool = true;

/// Expires is opt-in
pub const DEFAULT_ADD_EXPIRES_HEADER: bool = false;

/// Pragma for HTTP/1.0 clients is opt-in
pub const DEFAULT_ADD_BACKWARDS_CACHE_CONTROL: bool = false;

/// Default max age in seconds (0 = "no-cache" for legacy clients)
pub const DEFAULT_CACHE_MAX_AGE_SECONDS: u64 = 0;

/// Reserved flag, currently inert
pub const DEFAULT_REMOVE_PRE_EXISTING_HEADERS: bool = false;

/// Raw status line by default (some nginx setups only forward that form)
pub const DEFAULT_NGINX_HTTP_CODE: bool = true;

/// Upper bound for cache_max_age_seconds (100 years) so Expires stays a
/// four-digit-year HTTP date
pub const MAX_CACHE_MAX_AGE_SECONDS: u64 = 100 * 365 * 24 * 60 * 60;

// =============================================================================
// Logging defaults
// =============================================================================

/// Default log level when RUST_LOG is not set
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Accepted values for logging.level
pub const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

// =============================================================================
// Wire strings
// =============================================================================

pub const HEADER_ETAG: &str = "ETag";
pub const HEADER_LAST_MODIFIED: &str = "Last-Modified";
pub const HEADER_EXPIRES: &str = "Expires";
pub const HEADER_CACHE_CONTROL: &str = "Cache-Control";
pub const HEADER_PRAGMA: &str = "Pragma";

/// Pragma value when cache_max_age_seconds > 0
pub const PRAGMA_PUBLIC: &str = "public";

/// Pragma value when cache_max_age_seconds == 0
pub const PRAGMA_NO_CACHE: &str = "no-cache";

/// Weak validator marker
pub const WEAK_ETAG_PREFIX: &str = "W/";

/// Raw status line used for the nginx-friendly 304
pub const NOT_MODIFIED_STATUS_LINE: &str = "HTTP/1.1 304 Not Modified";

/// Fixed-width IMF-fixdate layout with a literal GMT zone
pub const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Layout of the GMT timestamps stored on content items
pub const CONTENT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// Extension point identifiers
// =============================================================================

/// Hook that may replace the header policy before the engine runs
pub const CONFIG_HOOK: &str = "cache_validators.defaults";

/// Hook that may rewrite the computed header set before it is sent
pub const HEADERS_HOOK: &str = "cache_validators.send";
