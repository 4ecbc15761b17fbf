//! # Outbound Override Propagation
//!
//! Stamps the active time override onto outgoing HTTP requests so that
//! downstream services participating in the same convention virtualize
//! the same instant.
//!
//! ## Behavior
//! - Stamping happens only while an override is active and both the
//!   master switch and outbound propagation are enabled.
//! - The stamped value is the canonical wire form of the override, under
//!   the configured outbound header name.
//! - Propagation is best effort. Nothing here ever fails a request; when
//!   the header cannot be produced the request simply goes out unstamped.
//!
//! ## Entry points
//! - [`apply`] mutates a plain [`HeaderMap`] and fits any client whose
//!   request headers are reachable before sending.
//! - [`OutboundLayer`] wraps a [`tower::Service`] handling
//!   `http::Request` values. The header is captured when the service is
//!   called, inside the caller's request context.

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::http::{HeaderMap, HeaderName, HeaderValue, Request};
use tower::{Layer, Service};
use tracing::{debug, warn};

use crate::config::time_machine::TimeMachineConfig;
use crate::time::context;

/// Produces the header to stamp, or `None` when nothing should be sent.
///
/// `None` means the machine or outbound propagation is disabled, no
/// override is active, or the configured header name is unusable.
pub fn header_value(config: &TimeMachineConfig) -> Option<(HeaderName, HeaderValue)> {
    if !config.enabled || !config.outbound.enabled {
        return None;
    }
    let encoded = context::encoded_override()?;

    let name = match HeaderName::try_from(config.outbound.name.as_str()) {
        Ok(name) => name,
        Err(_) => {
            warn!(name = %config.outbound.name, "invalid outbound time machine header name");
            return None;
        }
    };
    let value = HeaderValue::try_from(encoded).ok()?;

    Some((name, value))
}

/// Stamps the active override onto `headers`, replacing any previous
/// value under the same name. A no-op when there is nothing to stamp.
pub fn apply(config: &TimeMachineConfig, headers: &mut HeaderMap) {
    if let Some((name, value)) = header_value(config) {
        debug!(header = %name, value = ?value, "adding time machine header to outbound request");
        headers.insert(name, value);
    }
}

/// A [`tower::Layer`] producing [`Outbound`] services.
#[derive(Clone, Debug)]
pub struct OutboundLayer {
    config: Arc<TimeMachineConfig>,
}

impl OutboundLayer {
    /// Creates a layer stamping requests per `config`.
    pub fn new(config: Arc<TimeMachineConfig>) -> Self {
        Self { config }
    }
}

impl<S> Layer<S> for OutboundLayer {
    type Service = Outbound<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Outbound {
            inner,
            config: self.config.clone(),
        }
    }
}

/// A client-side service wrapper that stamps the active override onto
/// each request before handing it to the inner service.
#[derive(Clone, Debug)]
pub struct Outbound<S> {
    inner: S,
    config: Arc<TimeMachineConfig>,
}

impl<S, B> Service<Request<B>> for Outbound<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<B>) -> Self::Future {
        apply(&self.config, request.headers_mut());
        self.inner.call(request)
    }
}
