//! # Time Machine Facade
//!
//! One value that wires the whole feature into an application: it loads
//! the configuration, owns the virtual clock, and installs the inbound
//! binding and control endpoints onto an Axum router in one call.
//!
//! # Example
//! ```rust,no_run
//! use axum::{routing::get, Router};
//! use delorean_web::machine::TimeMachine;
//!
//! # async fn handler() -> &'static str { "..." }
//! let machine = TimeMachine::from_env().expect("time machine config");
//! let clock = machine.clock();
//!
//! let app: Router = machine.install(Router::new().route("/orders", get(handler)));
//! // serve `app`; handlers read time through `clock`
//! ```

use std::sync::Arc;

use axum::{middleware, Router};
use tracing::{debug, info, warn};

use crate::config::time_machine::TimeMachineConfig;
use crate::time::virtual_clock::VirtualClock;
use crate::time::zone::ZoneError;
use crate::web::{control, inbound, outbound::OutboundLayer};

/// The assembled time machine: configuration plus the clock answering
/// through it.
///
/// Cheap to clone; clones share the same configuration.
#[derive(Clone, Debug)]
pub struct TimeMachine {
    config: Arc<TimeMachineConfig>,
    clock: VirtualClock,
}

impl TimeMachine {
    /// Builds a machine from an explicit configuration.
    ///
    /// Fails when the configured reference zone is not a valid IANA name.
    pub fn new(config: TimeMachineConfig) -> Result<Self, ZoneError> {
        let clock = VirtualClock::with_zone_name(&config.zone)?;
        Ok(Self {
            config: Arc::new(config),
            clock,
        })
    }

    /// Builds a machine from environment variables.
    pub fn from_env() -> Result<Self, ZoneError> {
        Self::new(TimeMachineConfig::from_env())
    }

    /// The active configuration.
    pub fn config(&self) -> &TimeMachineConfig {
        &self.config
    }

    /// The virtual clock, for handing to application code.
    pub fn clock(&self) -> VirtualClock {
        self.clock
    }

    /// The control endpoint router, for callers who want to mount it at a
    /// custom place instead of through [`install`](TimeMachine::install).
    pub fn router(&self) -> Router {
        control::router(self.config.clone())
    }

    /// Installs the feature onto `app`: control endpoints under the
    /// configured prefix when cookie support is on, then the inbound
    /// binding around everything registered so far.
    ///
    /// Call this last when building the router; routes added afterwards
    /// are not covered by the binding. With the machine disabled, `app`
    /// is returned unchanged.
    pub fn install(&self, app: Router) -> Router {
        if !self.config.enabled {
            debug!("time machine disabled; requests pass through untouched");
            return app;
        }

        info!("time machine enabled; all dates flow through the virtual clock");

        let mut app = app;
        if self.config.cookie.enabled {
            let prefix = self.config.control_path.trim_matches('/');
            if prefix.is_empty() {
                warn!("empty control path; control endpoints not mounted");
            } else {
                info!(path = %prefix, "registering time machine control endpoints");
                app = app.nest(&format!("/{prefix}"), self.router());
            }
        }

        app.layer(middleware::from_fn_with_state(
            self.config.clone(),
            inbound::bind_inbound,
        ))
    }

    /// A [`tower::Layer`](tower::Layer) stamping the active override onto
    /// outgoing requests of a wrapped client service.
    pub fn outbound_layer(&self) -> OutboundLayer {
        OutboundLayer::new(self.config.clone())
    }

    /// A [`ureq::Middleware`] stamping the active override onto requests
    /// sent through a `ureq` agent.
    #[cfg(feature = "ureq")]
    pub fn ureq_middleware(&self) -> crate::web::ureq::TimeTravelMiddleware {
        crate::web::ureq::TimeTravelMiddleware::new(self.config.clone())
    }
}
