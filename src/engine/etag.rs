//! ETag derivation.
//!
//! The validator is a CRC-32 over a JSON array of
//! `[mtime_unix, created_at, guid, id, query_context]`. CRC-32 keeps values
//! short and stable but collides far more often than a cryptographic digest,
//! so it must never be used to decide whether content can be trusted.

use crate::config::HeaderConfig;
use crate::constants::WEAK_ETAG_PREFIX;

use super::types::ResourceDescriptor;

/// Bytes fed to the checksum, in fixed field order.
pub fn etag_material(descriptor: &ResourceDescriptor) -> String {
    serde_json::json!([
        descriptor.modified_at.timestamp(),
        descriptor.created_at,
        descriptor.guid,
        descriptor.id,
        descriptor.query_context,
    ])
    .to_string()
}

/// Quote a checksum as an entity tag, optionally weak.
pub fn format_etag(checksum: u32, weak: bool) -> String {
    if weak {
        format!("{}\"{}\"", WEAK_ETAG_PREFIX, checksum)
    } else {
        format!("\"{}\"", checksum)
    }
}

/// Compute the ETag for a resource under the given policy.
pub fn compute_etag(descriptor: &ResourceDescriptor, config: &HeaderConfig) -> String {
    let checksum = crc32fast::hash(etag_material(descriptor).as_bytes());
    format_etag(checksum, config.generate_weak_etag)
}
