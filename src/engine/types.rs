//! Inputs and outputs of the header decision engine.

use chrono::{DateTime, Utc};
use http::header::{HeaderMap, HeaderName, IF_MODIFIED_SINCE, IF_NONE_MATCH};

/// Identity, timestamps and query context of the content being served.
///
/// The engine trusts this value: whoever builds it is responsible for
/// filling every field, otherwise ETags stop being stable across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// Numeric content id
    pub id: u64,

    /// Globally unique locator of the content
    pub guid: String,

    /// Creation timestamp exactly as stored (only used as ETag input)
    pub created_at: String,

    /// Last modification time
    pub modified_at: DateTime<Utc>,

    /// Serialized query/selection context, never interpreted
    pub query_context: String,
}

impl ResourceDescriptor {
    pub fn new(
        id: u64,
        guid: impl Into<String>,
        created_at: impl Into<String>,
        modified_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            guid: guid.into(),
            created_at: created_at.into(),
            modified_at,
            query_context: String::new(),
        }
    }

    pub fn with_query_context(mut self, query_context: impl Into<String>) -> Self {
        self.query_context = query_context.into();
        self
    }
}

/// Validators sent by the client. Read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestValidators {
    pub if_none_match: Option<String>,
    pub if_modified_since: Option<String>,
}

impl RequestValidators {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_if_none_match(mut self, value: impl Into<String>) -> Self {
        self.if_none_match = Some(value.into());
        self
    }

    pub fn with_if_modified_since(mut self, value: impl Into<String>) -> Self {
        self.if_modified_since = Some(value.into());
        self
    }

    /// Extract `If-None-Match` and `If-Modified-Since` from request headers.
    /// Non-UTF8 values are treated as absent.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let read = |name: HeaderName| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };

        Self {
            if_none_match: read(IF_NONE_MATCH),
            if_modified_since: read(IF_MODIFIED_SINCE),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.if_none_match.is_none() && self.if_modified_since.is_none()
    }
}

/// Which validator produced a 304.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    ETag,
    LastModified,
}

/// Outcome of precondition evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortCircuitDecision {
    /// Send the computed headers and render the body as usual
    Proceed,
    /// Discard the body and answer 304
    NotModified(Validator),
}

impl ShortCircuitDecision {
    pub fn is_not_modified(&self) -> bool {
        matches!(self, ShortCircuitDecision::NotModified(_))
    }
}
