//! # Override Propagation for `ureq` Clients
//!
//! A [`ureq::Middleware`] that stamps the active time override onto every
//! request sent through an agent, mirroring what
//! [`OutboundLayer`](crate::web::outbound::OutboundLayer) does for tower
//! clients. Available behind the `ureq` cargo feature.
//!
//! `ureq` calls are blocking, so the override context must be live on the
//! calling thread. Inside a request handler that is the case already; in
//! `spawn_blocking` closures, snapshot the override first and re-enter it
//! with [`context::sync_scope`](crate::time::context::sync_scope).
//!
//! # Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use delorean_web::config::time_machine::TimeMachineConfig;
//! use delorean_web::web::ureq::TimeTravelMiddleware;
//!
//! let cfg = Arc::new(TimeMachineConfig::from_env());
//! let agent = ureq::AgentBuilder::new()
//!     .middleware(TimeTravelMiddleware::new(cfg))
//!     .build();
//!
//! let _res = agent.get("https://downstream.test/api").call();
//! ```

use std::sync::Arc;

use tracing::debug;

use crate::config::time_machine::TimeMachineConfig;
use crate::web::outbound;

/// Stamps the active override onto requests sent through a
/// [`ureq::Agent`].
pub struct TimeTravelMiddleware {
    config: Arc<TimeMachineConfig>,
}

impl TimeTravelMiddleware {
    /// Creates a middleware stamping requests per `config`.
    pub fn new(config: Arc<TimeMachineConfig>) -> Self {
        Self { config }
    }
}

impl ureq::Middleware for TimeTravelMiddleware {
    fn handle(
        &self,
        request: ureq::Request,
        next: ureq::MiddlewareNext,
    ) -> Result<ureq::Response, ureq::Error> {
        let request = match outbound::header_value(&self.config) {
            Some((name, value)) => match value.to_str() {
                Ok(text) => {
                    debug!(header = %name, value = %text, "adding time machine header to outbound request");
                    request.set(name.as_str(), text)
                }
                Err(_) => request,
            },
            None => request,
        };

        next.handle(request)
    }
}
