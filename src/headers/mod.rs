//! Outgoing caching headers.
//!
//! [`HeaderSet`] is an insertion-ordered map restricted to the five headers
//! this crate knows how to produce. Inserting an existing name replaces its
//! value in place, so a set never carries duplicates.

mod date;

pub use date::{format_http_date, parse_http_date};

use std::fmt;

use http::header::{self, HeaderMap, HeaderValue};

use crate::constants::{
    HEADER_CACHE_CONTROL, HEADER_ETAG, HEADER_EXPIRES, HEADER_LAST_MODIFIED, HEADER_PRAGMA,
};

/// The supported response header names, with their fixed wire casing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeaderName {
    ETag,
    LastModified,
    Expires,
    CacheControl,
    Pragma,
}

impl HeaderName {
    pub const ALL: [HeaderName; 5] = [
        HeaderName::ETag,
        HeaderName::LastModified,
        HeaderName::Expires,
        HeaderName::CacheControl,
        HeaderName::Pragma,
    ];

    /// Wire spelling, e.g. `Last-Modified`
    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderName::ETag => HEADER_ETAG,
            HeaderName::LastModified => HEADER_LAST_MODIFIED,
            HeaderName::Expires => HEADER_EXPIRES,
            HeaderName::CacheControl => HEADER_CACHE_CONTROL,
            HeaderName::Pragma => HEADER_PRAGMA,
        }
    }

    /// Matching `http` crate header name
    pub fn to_http(&self) -> header::HeaderName {
        match self {
            HeaderName::ETag => header::ETAG,
            HeaderName::LastModified => header::LAST_MODIFIED,
            HeaderName::Expires => header::EXPIRES,
            HeaderName::CacheControl => header::CACHE_CONTROL,
            HeaderName::Pragma => header::PRAGMA,
        }
    }

    /// Case-insensitive lookup of a supported header name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for HeaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered header name → value mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    entries: Vec<(HeaderName, String)>,
}

impl HeaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a header. Returns the previous value, if any.
    pub fn insert(&mut self, name: HeaderName, value: impl Into<String>) -> Option<String> {
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: HeaderName) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn remove(&mut self, name: HeaderName) -> Option<String> {
        let index = self.entries.iter().position(|(existing, _)| *existing == name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn contains(&self, name: HeaderName) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (HeaderName, &str)> {
        self.entries.iter().map(|(name, value)| (*name, value.as_str()))
    }

    /// Convert into an `http::HeaderMap`.
    ///
    /// Values that are not valid header values (e.g. contain control
    /// characters after a hook rewrote them) are dropped with a warning.
    pub fn to_header_map(&self) -> HeaderMap {
        let mut map = HeaderMap::with_capacity(self.entries.len());
        for (name, value) in self.iter() {
            match HeaderValue::from_str(value) {
                Ok(value) => {
                    map.insert(name.to_http(), value);
                }
                Err(_) => {
                    tracing::warn!(header = %name, "Dropping header with invalid value");
                }
            }
        }
        map
    }
}

impl<'a> IntoIterator for &'a HeaderSet {
    type Item = (HeaderName, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (HeaderName, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl FromIterator<(HeaderName, String)> for HeaderSet {
    fn from_iter<I: IntoIterator<Item = (HeaderName, String)>>(iter: I) -> Self {
        let mut set = HeaderSet::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}
