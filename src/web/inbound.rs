//! # Inbound Override Binding
//!
//! Axum middleware that binds the time override carried by an incoming
//! request to the context of that request and tears it down afterwards.
//!
//! ## Candidate selection
//! - When cookie support is enabled, the override cookie provides the
//!   initial candidate.
//! - A non-empty override header always wins over the cookie.
//! - Empty values count as absent; text that decodes as neither wire form
//!   is ignored, and the request proceeds without an override.
//!
//! ## Teardown
//! The override lives in a context owned by the request future itself, so
//! it is gone once the response is produced, whether the handler
//! succeeded, failed, or was cancelled. Nothing can leak into the next
//! request served by the same worker.
//!
//! # Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use axum::{middleware, routing::get, Router};
//! use delorean_web::config::time_machine::TimeMachineConfig;
//! use delorean_web::web::inbound::bind_inbound;
//!
//! let cfg = Arc::new(TimeMachineConfig::from_env());
//! let app: Router = Router::new()
//!     .route("/orders", get(|| async { "..." }))
//!     .layer(middleware::from_fn_with_state(cfg, bind_inbound));
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, trace};

use crate::config::time_machine::TimeMachineConfig;
use crate::time::{codec, context};

/// Middleware function that virtualizes time for one request.
///
/// When the time machine is enabled, every request runs inside its own
/// override context, seeded from the request's cookie and header when
/// inbound binding is on and empty otherwise. Handlers may install or
/// clear overrides at any point; the context is discarded with the
/// request. When the machine is disabled the request passes through
/// untouched and no context exists.
pub async fn bind_inbound(
    State(config): State<Arc<TimeMachineConfig>>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    if !config.enabled {
        return next.run(request).await;
    }

    let seed = if config.inbound_enabled {
        decode_candidate(&config, &jar, request.headers())
    } else {
        None
    };

    context::scope(seed, next.run(request)).await
}

/// Picks the override candidate from the request and decodes it.
fn decode_candidate(
    config: &TimeMachineConfig,
    jar: &CookieJar,
    headers: &HeaderMap,
) -> Option<context::TimeOverride> {
    let text = override_candidate(config, jar, headers)?;
    match codec::decode(&text) {
        Ok(value) => {
            trace!(value = %text, "binding inbound time override");
            Some(value)
        }
        Err(err) => {
            info!(%err, "ignoring unparseable inbound time override");
            None
        }
    }
}

/// Extracts the raw override text, header winning over cookie.
fn override_candidate(
    config: &TimeMachineConfig,
    jar: &CookieJar,
    headers: &HeaderMap,
) -> Option<String> {
    let mut candidate = None;

    if config.cookie.enabled {
        candidate = jar
            .get(config.cookie.name.as_str())
            .map(|c| c.value().to_string())
            .filter(|s| !s.is_empty());
    }

    if let Some(header) = headers
        .get(config.header_name.as_str())
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
    {
        candidate = Some(header.to_string());
    }

    candidate
}
