//! # delorean_web
//!
//! Per-request time virtualization for Axum services.
//!
//! This crate lets test traffic steer what "now" means for one request at
//! a time, without touching application logic:
//! - An override arrives on a request header or cookie, bound for exactly
//!   that request (`web::inbound`)
//! - Application code reads time through an override-aware clock
//!   (`time::virtual_clock`)
//! - Outgoing calls carry the override downstream (`web::outbound`)
//! - Browser-facing endpoints manage the override cookie (`web::control`)
//!
//! ## Example usage (in another crate)
//!
//! ```rust,no_run
//! use axum::Router;
//! use delorean_web::machine::TimeMachine;
//!
//! let machine = TimeMachine::from_env().expect("time machine config");
//! let clock = machine.clock();
//! let app: Router = machine.install(Router::new());
//! ```

// ===============================
// Re-exports of external crates
// ===============================

pub use axum;
pub use axum_extra;
pub use chrono;
pub use chrono_tz;
pub use serde;
pub use serde_json;
pub use tokio;
pub use tower;
#[cfg(feature = "ureq")]
pub use ureq;

// ===============================
// Public modules
// ===============================
pub mod config;
pub mod machine;
pub mod time;
pub mod web;
