//! Response sinks: where headers and the 304 status end up.

use http::header::HeaderValue;
use http::{StatusCode, Version};

use crate::config::HeaderConfig;
use crate::constants::NOT_MODIFIED_STATUS_LINE;
use crate::headers::{HeaderName, HeaderSet};

/// The response being built for the current request.
pub trait ResponseSink {
    /// True once output has started and headers can no longer change
    fn headers_sent(&self) -> bool;

    /// Set (replace) a response header
    fn set_header(&mut self, name: HeaderName, value: &str);

    /// Send a raw status line such as `HTTP/1.1 304 Not Modified`
    fn write_status_line(&mut self, line: &str);

    /// Whether [`ResponseSink::set_status_code`] is available
    fn supports_status_code(&self) -> bool {
        true
    }

    /// Structured status setter
    fn set_status_code(&mut self, status: StatusCode);
}

/// How a 304 is communicated to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusEmission {
    /// `HTTP/1.1 304 Not Modified` written as a raw status line
    RawStatusLine,
    /// 304 through the structured status setter
    StatusCode,
}

impl StatusEmission {
    /// Raw line when `nginx_http_code` is set or the sink has no setter.
    pub fn select(config: &HeaderConfig, sink: &dyn ResponseSink) -> Self {
        if config.nginx_http_code || !sink.supports_status_code() {
            StatusEmission::RawStatusLine
        } else {
            StatusEmission::StatusCode
        }
    }

    pub fn emit(&self, sink: &mut dyn ResponseSink) {
        match self {
            StatusEmission::RawStatusLine => sink.write_status_line(NOT_MODIFIED_STATUS_LINE),
            StatusEmission::StatusCode => sink.set_status_code(StatusCode::NOT_MODIFIED),
        }
    }
}

/// In-memory sink that records everything written to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingResponse {
    pub headers: HeaderSet,
    pub status_line: Option<String>,
    pub status: Option<StatusCode>,
    headers_sent: bool,
    status_setter: bool,
}

impl Default for RecordingResponse {
    fn default() -> Self {
        Self {
            headers: HeaderSet::new(),
            status_line: None,
            status: None,
            headers_sent: false,
            status_setter: true,
        }
    }
}

impl RecordingResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// A response whose output has already started
    pub fn committed(mut self) -> Self {
        self.headers_sent = true;
        self
    }

    /// A response without a structured status setter
    pub fn without_status_setter(mut self) -> Self {
        self.status_setter = false;
        self
    }

    /// True if nothing at all was written
    pub fn is_untouched(&self) -> bool {
        self.headers.is_empty() && self.status_line.is_none() && self.status.is_none()
    }
}

impl ResponseSink for RecordingResponse {
    fn headers_sent(&self) -> bool {
        self.headers_sent
    }

    fn set_header(&mut self, name: HeaderName, value: &str) {
        self.headers.insert(name, value);
    }

    fn write_status_line(&mut self, line: &str) {
        self.status_line = Some(line.to_string());
    }

    fn supports_status_code(&self) -> bool {
        self.status_setter
    }

    fn set_status_code(&mut self, status: StatusCode) {
        self.status = Some(status);
    }
}

/// `http` response parts. Nothing has been sent while we hold the parts, and
/// a raw status line collapses to the 304 status on an HTTP/1.1 response.
impl ResponseSink for http::response::Parts {
    fn headers_sent(&self) -> bool {
        false
    }

    fn set_header(&mut self, name: HeaderName, value: &str) {
        match HeaderValue::from_str(value) {
            Ok(value) => {
                self.headers.insert(name.to_http(), value);
            }
            Err(_) => {
                tracing::warn!(header = %name, "Dropping header with invalid value");
            }
        }
    }

    fn write_status_line(&mut self, _line: &str) {
        self.version = Version::HTTP_11;
        self.status = StatusCode::NOT_MODIFIED;
    }

    fn set_status_code(&mut self, status: StatusCode) {
        self.status = status;
    }
}
