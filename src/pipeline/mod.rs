// Request pipeline module - runs resolution, hooks and the header engine
// against a response sink for one request

mod sink;

pub use sink::{RecordingResponse, ResponseSink, StatusEmission};

use std::fmt;

use chrono::{DateTime, Utc};

use crate::config::HeaderConfig;
use crate::engine::{
    build_headers, evaluate_preconditions, RequestValidators, ResourceDescriptor,
    ShortCircuitDecision, Validator,
};
use crate::headers::HeaderSet;
use crate::hooks::Hooks;
use crate::resolver::{self, RequestContext, SkipReason};

/// Source of "now" for the Expires header
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// What happened to a request.
///
/// `NotModified` is terminal: the caller must stop rendering and send the
/// response as-is, without a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Resolver declined; the response was not touched
    Skipped(SkipReason),
    /// Output had already started; the response was not touched
    HeadersAlreadySent,
    /// Headers written; continue with the normal body
    Proceed { headers: HeaderSet },
    /// Headers and 304 written; halt processing
    NotModified {
        headers: HeaderSet,
        validator: Validator,
        emission: StatusEmission,
    },
}

impl Disposition {
    pub fn is_not_modified(&self) -> bool {
        matches!(self, Disposition::NotModified { .. })
    }

    /// Headers written to the sink, if any
    pub fn headers(&self) -> Option<&HeaderSet> {
        match self {
            Disposition::Proceed { headers } | Disposition::NotModified { headers, .. } => {
                Some(headers)
            }
            Disposition::Skipped(_) | Disposition::HeadersAlreadySent => None,
        }
    }
}

pub struct HeaderPipeline {
    config: HeaderConfig,
    hooks: Hooks,
    clock: Box<dyn Clock>,
}

impl HeaderPipeline {
    pub fn new(config: HeaderConfig) -> Self {
        Self {
            config,
            hooks: Hooks::new(),
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Base policy, before the config hook runs
    pub fn config(&self) -> &HeaderConfig {
        &self.config
    }

    /// Resolve the request and, if it is cacheable, run [`HeaderPipeline::apply`].
    pub fn handle(
        &self,
        request: &RequestContext,
        validators: &RequestValidators,
        sink: &mut dyn ResponseSink,
    ) -> Disposition {
        match resolver::resolve(request) {
            Ok(descriptor) => self.apply(&descriptor, validators, sink),
            Err(reason) => {
                tracing::debug!(reason = %reason, "Skipping cache headers");
                Disposition::Skipped(reason)
            }
        }
    }

    /// Build headers for `descriptor`, write them to `sink` and answer 304
    /// when the client's validators still match.
    pub fn apply(
        &self,
        descriptor: &ResourceDescriptor,
        validators: &RequestValidators,
        sink: &mut dyn ResponseSink,
    ) -> Disposition {
        let config = self.hooks.apply_config(self.config);
        let headers = build_headers(descriptor, &config, self.clock.now());
        let headers = self.hooks.apply_headers(headers);

        if sink.headers_sent() {
            tracing::debug!(
                resource_id = descriptor.id,
                "Output already started, leaving response untouched"
            );
            return Disposition::HeadersAlreadySent;
        }

        // remove_pre_existing_headers is reserved and intentionally inert

        for (name, value) in &headers {
            sink.set_header(name, value);
        }

        match evaluate_preconditions(&headers, validators, descriptor.modified_at, &config) {
            ShortCircuitDecision::Proceed => {
                tracing::trace!(
                    resource_id = descriptor.id,
                    headers = headers.len(),
                    "Cache headers written"
                );
                Disposition::Proceed { headers }
            }
            ShortCircuitDecision::NotModified(validator) => {
                let emission = StatusEmission::select(&config, sink);
                emission.emit(sink);
                tracing::debug!(
                    resource_id = descriptor.id,
                    validator = ?validator,
                    emission = ?emission,
                    "Client copy is current, answering 304"
                );
                Disposition::NotModified {
                    headers,
                    validator,
                    emission,
                }
            }
        }
    }
}

impl fmt::Debug for HeaderPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderPipeline")
            .field("config", &self.config)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}
