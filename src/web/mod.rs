//! HTTP surfaces: inbound binding, outbound propagation, and the control
//! endpoints.

pub mod control;
pub mod inbound;
pub mod outbound;
#[cfg(feature = "ureq")]
pub mod ureq;
