//! Resource resolution.
//!
//! Turns an explicit [`RequestContext`] into a [`ResourceDescriptor`], or
//! declines with a [`SkipReason`]. Declining is the normal outcome for
//! requests that must never carry cache validators (admin screens, AJAX,
//! XML-RPC, REST) and for requests with nothing resolvable to describe.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::CONTENT_TIMESTAMP_FORMAT;
use crate::engine::ResourceDescriptor;
use crate::error::{Error, Result};

/// Where the request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestOrigin {
    /// Regular page view
    #[default]
    Frontend,
    Admin,
    Ajax,
    XmlRpc,
    Rest,
}

/// What the request's main query selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    /// A single content item
    Singular,
    Feed,
    Archive,
    Search,
    #[default]
    Other,
}

impl QueryKind {
    /// Feeds, archives and searches are described by their first item
    pub fn is_listing(&self) -> bool {
        matches!(self, QueryKind::Feed | QueryKind::Archive | QueryKind::Search)
    }
}

/// A stored content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: u64,
    pub guid: String,

    /// Content type; items without one are not describable
    #[serde(default)]
    pub content_type: Option<String>,

    /// Creation time in GMT, `YYYY-MM-DD HH:MM:SS`
    pub date_gmt: String,

    /// Modification time in GMT, `YYYY-MM-DD HH:MM:SS`
    pub modified_gmt: String,

    #[serde(default)]
    pub password_required: bool,
}

/// Everything the resolver needs to know about the current request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestContext {
    #[serde(default)]
    pub origin: RequestOrigin,

    #[serde(default)]
    pub query_kind: QueryKind,

    /// Item selected by a singular query
    #[serde(default)]
    pub queried_object: Option<ContentItem>,

    /// Items selected by a listing query, in display order
    #[serde(default)]
    pub listing: Vec<ContentItem>,

    /// Public query variables; serialized into the ETag as opaque context
    #[serde(default)]
    pub query_vars: BTreeMap<String, serde_json::Value>,
}

impl RequestContext {
    /// Load a request fixture from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Deterministic serialization of `query_vars` (keys sorted)
    pub fn serialized_query_vars(&self) -> String {
        serde_json::Value::Object(
            self.query_vars
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        )
        .to_string()
    }
}

/// Why a request gets no caching headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    ExcludedOrigin(RequestOrigin),
    UnsupportedQuery(QueryKind),
    NoQueriedObject,
    EmptyListing,
    MissingContentType { id: u64 },
    PasswordProtected { id: u64 },
    InvalidModifiedTime { id: u64, value: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::ExcludedOrigin(origin) => {
                write!(f, "{:?} requests never receive cache headers", origin)
            }
            SkipReason::UnsupportedQuery(kind) => {
                write!(f, "{:?} queries are not cacheable", kind)
            }
            SkipReason::NoQueriedObject => write!(f, "No queried object"),
            SkipReason::EmptyListing => write!(f, "Listing has no items"),
            SkipReason::MissingContentType { id } => {
                write!(f, "Content item {} has no content type", id)
            }
            SkipReason::PasswordProtected { id } => {
                write!(f, "Content item {} is password protected", id)
            }
            SkipReason::InvalidModifiedTime { id, value } => {
                write!(f, "Content item {} has invalid modified time '{}'", id, value)
            }
        }
    }
}

/// Resolve the descriptor for a request, or explain why there is none.
///
/// Singular queries describe the queried object and decline when it is
/// password protected. Listings describe their first item only.
pub fn resolve(request: &RequestContext) -> std::result::Result<ResourceDescriptor, SkipReason> {
    if request.origin != RequestOrigin::Frontend {
        return Err(SkipReason::ExcludedOrigin(request.origin));
    }

    let item = if request.query_kind.is_listing() {
        request.listing.first().ok_or(SkipReason::EmptyListing)?
    } else if request.query_kind == QueryKind::Singular {
        let item = request
            .queried_object
            .as_ref()
            .ok_or(SkipReason::NoQueriedObject)?;
        if item.password_required {
            return Err(SkipReason::PasswordProtected { id: item.id });
        }
        item
    } else {
        return Err(SkipReason::UnsupportedQuery(request.query_kind));
    };

    if item.content_type.is_none() {
        return Err(SkipReason::MissingContentType { id: item.id });
    }

    let modified_at = parse_content_timestamp(&item.modified_gmt).ok_or_else(|| {
        SkipReason::InvalidModifiedTime {
            id: item.id,
            value: item.modified_gmt.clone(),
        }
    })?;

    Ok(
        ResourceDescriptor::new(item.id, item.guid.clone(), item.date_gmt.clone(), modified_at)
            .with_query_context(request.serialized_query_vars()),
    )
}

/// Parse a stored `YYYY-MM-DD HH:MM:SS` GMT timestamp.
///
/// The zero date `0000-00-00 00:00:00` carried by drafts is rejected on
/// purpose, so such content gets no validators at all.
pub fn parse_content_timestamp(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value.trim(), CONTENT_TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}
