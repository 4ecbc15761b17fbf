//! # Per-request time override context
//!
//! Holds the active [`TimeOverride`] for exactly one unit of request
//! handling (a tokio task that has entered a time-machine context) and
//! nothing wider.
//!
//! # Purpose
//! Application code asks [`VirtualClock`](crate::time::virtual_clock::VirtualClock)
//! for "now" without any extra parameters; this module is where that call
//! finds the override, if one is active:
//!
//! - The inbound binding opens a context around every request it handles,
//!   so overrides never outlive the request that installed them.
//! - Tests and background jobs open their own context with [`scope`] or
//!   [`sync_scope`].
//! - Child tasks receive a **copy** of the parent's override via
//!   [`inherit`]; afterwards parent and child are fully independent.
//!
//! # Design Notes
//! - Storage is a `tokio::task_local!` cell owned by the scope future
//!   itself, not by the worker thread. Dropping the scope (completion,
//!   panic, or cancellation) destroys the override, so pooled threads can
//!   never leak one request's override into the next.
//! - Concurrent requests run in distinct contexts and cannot observe each
//!   other's override; no locking is involved anywhere.
//! - Outside any context, [`set_override`] has nothing to write to. It
//!   logs and does nothing: the worst failure mode of this crate is
//!   "virtualization silently did not apply", never a crash.
//!
//! # Example
//! ```rust
//! use chrono::NaiveDate;
//! use delorean_web::time::context::{self, TimeOverride};
//!
//! let date = NaiveDate::from_ymd_opt(2016, 1, 1).unwrap();
//! let seen = context::sync_scope(Some(TimeOverride::FixedDate(date)), || {
//!     context::current_override()
//! });
//!
//! assert_eq!(seen, Some(TimeOverride::FixedDate(date)));
//! assert!(!context::is_overridden());
//! ```

use std::cell::Cell;
use std::future::Future;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::warn;

use crate::time::codec;

/// The active virtual date/time substitution for one execution context.
///
/// The two variants exist because testers want two different things:
/// "pretend it is this calendar day" (business-date testing, where elapsed
/// time during the run still matters) and "pretend it is this exact
/// second" (deterministic snapshot testing). Which one is active is an
/// explicit, matchable property of the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOverride {
    /// Pins the calendar date only; time-of-day keeps advancing with real
    /// elapsed time, and the date never rolls over midnight on its own.
    FixedDate(NaiveDate),
    /// Pins an exact, non-advancing point in time. The value is the naive
    /// local form carried on the wire; it is interpreted in the clock's
    /// reference zone whenever an absolute instant is needed.
    FixedInstant(NaiveDateTime),
}

tokio::task_local! {
    static ACTIVE_OVERRIDE: Cell<Option<TimeOverride>>;
}

/// Runs `future` inside a fresh context seeded with `seed`.
///
/// The context ends when the returned future is dropped, which also
/// discards whatever override it held at that point. Entering a context
/// while one is already active shadows the outer one for the duration and
/// restores it afterwards.
pub fn scope<F>(seed: Option<TimeOverride>, future: F) -> impl Future<Output = F::Output>
where
    F: Future,
{
    ACTIVE_OVERRIDE.scope(Cell::new(seed), future)
}

/// Synchronous variant of [`scope`] for non-async callers and tests.
pub fn sync_scope<F, R>(seed: Option<TimeOverride>, f: F) -> R
where
    F: FnOnce() -> R,
{
    ACTIVE_OVERRIDE.sync_scope(Cell::new(seed), f)
}

/// Runs `future` in a child context seeded with a snapshot of the current
/// override.
///
/// The snapshot is taken when `inherit` is called, so pass the result to
/// [`tokio::spawn`] to give a child task the override its parent had at
/// spawn time. Parent and child hold independent copies afterwards:
/// clearing or replacing the override on one side never affects the other.
///
/// # Example
/// ```rust,no_run
/// use delorean_web::time::context;
///
/// # async fn demo() {
/// let child = tokio::spawn(context::inherit(async {
///     context::current_override()
/// }));
/// # child.await.unwrap();
/// # }
/// ```
pub fn inherit<F>(future: F) -> impl Future<Output = F::Output>
where
    F: Future,
{
    scope(current_override(), future)
}

/// Replaces any override in the current context.
///
/// Never fails. Outside a context this is a no-op (a warning is logged);
/// within request handling a context is always present because the inbound
/// binding opens one whenever the time machine is enabled.
pub fn set_override(value: TimeOverride) {
    if ACTIVE_OVERRIDE.try_with(|cell| cell.set(Some(value))).is_err() {
        warn!(?value, "no time machine context on this task; override not installed");
    }
}

/// Removes any override in the current context. Idempotent; a no-op when
/// nothing is set or no context is active.
pub fn clear_override() {
    let _ = ACTIVE_OVERRIDE.try_with(|cell| cell.set(None));
}

/// Returns `true` when an override is active in the current context.
pub fn is_overridden() -> bool {
    current_override().is_some()
}

/// Returns a copy of the active override, if any.
pub fn current_override() -> Option<TimeOverride> {
    ACTIVE_OVERRIDE.try_with(Cell::get).ok().flatten()
}

/// Returns the canonical wire encoding of the active override, or `None`
/// when nothing is set: the date-only form for a fixed date, the full
/// date-time form for a fixed instant.
pub fn encoded_override() -> Option<String> {
    current_override().map(codec::encode)
}
