// Header decision engine tests
//
// Behaviour of build_headers / compute_etag / evaluate_preconditions as seen
// from outside the crate.

use cache_validators::config::HeaderConfig;
use cache_validators::engine::{
    build_headers, compute_etag, evaluate_preconditions, RequestValidators, ResourceDescriptor,
    ShortCircuitDecision, Validator,
};
use cache_validators::headers::{format_http_date, HeaderName, HeaderSet};
use chrono::{DateTime, Duration, TimeZone, Utc};
use rstest::rstest;

fn mtime() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 29, 18, 45, 12).unwrap()
}

fn descriptor() -> ResourceDescriptor {
    ResourceDescriptor::new(
        1024,
        "https://news.example.com/?p=1024",
        "2024-02-28 08:00:00",
        mtime(),
    )
    .with_query_context(r#"{"name":"leap-day"}"#)
}

fn etag_only() -> HeaderConfig {
    HeaderConfig {
        add_etag_header: true,
        add_last_modified_header: false,
        ..Default::default()
    }
}

fn last_modified_only() -> HeaderConfig {
    HeaderConfig {
        add_etag_header: false,
        add_last_modified_header: true,
        ..Default::default()
    }
}

#[test]
fn test_etag_is_deterministic() {
    let config = HeaderConfig::default();
    let first = compute_etag(&descriptor(), &config);
    for _ in 0..10 {
        assert_eq!(compute_etag(&descriptor(), &config), first);
    }
}

#[test]
fn test_etag_changes_with_modification_time() {
    let config = HeaderConfig::default();
    let mut touched = descriptor();
    touched.modified_at = mtime() + Duration::seconds(1);

    assert_ne!(
        compute_etag(&descriptor(), &config),
        compute_etag(&touched, &config)
    );
}

#[test]
fn test_etag_changes_with_identity() {
    let config = HeaderConfig::default();
    let mut other = descriptor();
    other.id = 1025;
    assert_ne!(
        compute_etag(&descriptor(), &config),
        compute_etag(&other, &config)
    );
}

#[rstest]
#[case(true, "W/\"")]
#[case(false, "\"")]
fn test_weak_strong_toggle(#[case] weak: bool, #[case] prefix: &str) {
    let config = HeaderConfig {
        generate_weak_etag: weak,
        ..Default::default()
    };
    let etag = compute_etag(&descriptor(), &config);

    assert!(etag.starts_with(prefix), "{} should start with {}", etag, prefix);
    assert!(etag.ends_with('"'));
    assert_eq!(etag.starts_with("W/"), weak);
}

#[test]
fn test_weak_and_strong_share_checksum() {
    let strong = compute_etag(&descriptor(), &HeaderConfig::default());
    let weak = compute_etag(
        &descriptor(),
        &HeaderConfig {
            generate_weak_etag: true,
            ..Default::default()
        },
    );
    assert_eq!(weak, format!("W/{}", strong));
}

#[test]
fn test_not_modified_on_exact_etag_match() {
    let config = etag_only();
    let headers = build_headers(&descriptor(), &config, Utc::now());
    let etag = headers.get(HeaderName::ETag).unwrap().to_string();

    let validators = RequestValidators::new().with_if_none_match(etag);
    assert_eq!(
        evaluate_preconditions(&headers, &validators, mtime(), &config),
        ShortCircuitDecision::NotModified(Validator::ETag)
    );
}

#[test]
fn test_fixed_etag_value_matches_exactly() {
    let mut headers = HeaderSet::new();
    headers.insert(HeaderName::ETag, "\"123456\"");

    let hit = RequestValidators::new().with_if_none_match("\"123456\"");
    let miss = RequestValidators::new().with_if_none_match("\"999999\"");

    assert_eq!(
        evaluate_preconditions(&headers, &hit, mtime(), &etag_only()),
        ShortCircuitDecision::NotModified(Validator::ETag)
    );
    assert_eq!(
        evaluate_preconditions(&headers, &miss, mtime(), &etag_only()),
        ShortCircuitDecision::Proceed
    );
}

#[test]
fn test_proceed_on_mismatched_etag() {
    let config = etag_only();
    let headers = build_headers(&descriptor(), &config, Utc::now());
    let validators = RequestValidators::new().with_if_none_match("\"999999\"");

    assert_eq!(
        evaluate_preconditions(&headers, &validators, mtime(), &config),
        ShortCircuitDecision::Proceed
    );
}

#[rstest]
#[case(-1, ShortCircuitDecision::Proceed)]
#[case(0, ShortCircuitDecision::NotModified(Validator::LastModified))]
#[case(1, ShortCircuitDecision::NotModified(Validator::LastModified))]
#[case(86_400, ShortCircuitDecision::NotModified(Validator::LastModified))]
fn test_if_modified_since_boundary(
    #[case] offset_seconds: i64,
    #[case] expected: ShortCircuitDecision,
) {
    let config = last_modified_only();
    let headers = build_headers(&descriptor(), &config, Utc::now());
    let since = format_http_date(mtime() + Duration::seconds(offset_seconds));
    let validators = RequestValidators::new().with_if_modified_since(since);

    assert_eq!(
        evaluate_preconditions(&headers, &validators, mtime(), &config),
        expected
    );
}

#[test]
fn test_etag_disabled_omits_header_and_ignores_if_none_match() {
    let matching_etag = compute_etag(&descriptor(), &HeaderConfig::default());
    let config = HeaderConfig {
        add_etag_header: false,
        add_last_modified_header: false,
        ..Default::default()
    };
    let headers = build_headers(&descriptor(), &config, Utc::now());
    assert!(!headers.contains(HeaderName::ETag));

    // Even a header set that still carries the ETag is not consulted
    let mut stale = headers.clone();
    stale.insert(HeaderName::ETag, matching_etag.clone());
    let validators = RequestValidators::new().with_if_none_match(matching_etag);

    assert_eq!(
        evaluate_preconditions(&stale, &validators, mtime(), &config),
        ShortCircuitDecision::Proceed
    );
}

#[test]
fn test_last_modified_disabled_ignores_if_modified_since() {
    let config = etag_only();
    let headers = build_headers(&descriptor(), &config, Utc::now());
    assert!(!headers.contains(HeaderName::LastModified));

    let validators = RequestValidators::new().with_if_modified_since(format_http_date(mtime()));
    assert_eq!(
        evaluate_preconditions(&headers, &validators, mtime(), &config),
        ShortCircuitDecision::Proceed
    );
}

#[test]
fn test_last_modified_equals_mtime_in_gmt() {
    let headers = build_headers(&descriptor(), &HeaderConfig::default(), Utc::now());
    assert_eq!(
        headers.get(HeaderName::LastModified),
        Some("Thu, 29 Feb 2024 18:45:12 GMT")
    );
}

#[test]
fn test_expires_tracks_now_not_mtime() {
    let config = HeaderConfig {
        add_expires_header: true,
        cache_max_age_seconds: 600,
        ..Default::default()
    };
    let earlier = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let later = earlier + Duration::seconds(90);

    let first = build_headers(&descriptor(), &config, earlier);
    let second = build_headers(&descriptor(), &config, later);

    assert_eq!(
        first.get(HeaderName::Expires),
        Some("Wed, 01 Jan 2025 00:10:00 GMT")
    );
    assert_ne!(
        first.get(HeaderName::Expires),
        second.get(HeaderName::Expires)
    );
    assert_eq!(first.get(HeaderName::ETag), second.get(HeaderName::ETag));
    assert_eq!(
        first.get(HeaderName::LastModified),
        second.get(HeaderName::LastModified)
    );
}

#[rstest]
#[case(0, "no-cache")]
#[case(3600, "public")]
fn test_pragma_policy(#[case] max_age: u64, #[case] expected: &str) {
    let config = HeaderConfig {
        add_backwards_cache_control: true,
        cache_max_age_seconds: max_age,
        ..Default::default()
    };
    let headers = build_headers(&descriptor(), &config, Utc::now());
    assert_eq!(headers.get(HeaderName::Pragma), Some(expected));
}

#[test]
fn test_cache_control_is_never_generated() {
    let config = HeaderConfig {
        add_expires_header: true,
        add_backwards_cache_control: true,
        cache_max_age_seconds: 60,
        ..Default::default()
    };
    let headers = build_headers(&descriptor(), &config, Utc::now());
    assert!(!headers.contains(HeaderName::CacheControl));
    assert_eq!(headers.len(), 4);
}
