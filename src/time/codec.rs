//! # Wire codec for time overrides
//!
//! One canonical text form per override variant, shared by every surface
//! that carries an override (inbound header, cookie, control endpoints,
//! outbound header):
//!
//! - `2016-01-01` decodes to a fixed date.
//! - `2016-01-01T16:30:30` decodes to a fixed instant.
//!
//! Date-only text always yields a fixed date, full date-time text always a
//! fixed instant; the round trip through [`encode`] and [`decode`] is
//! exact. Zone designators, offsets, fractional seconds, and non-canonical
//! spellings such as `2016-1-1` are rejected on decode, and [`encode`]
//! truncates any sub-second precision so its output stays inside the
//! accepted grammar.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::time::context::TimeOverride;

/// Format of the date-only wire form, e.g. `2016-01-01`.
pub const DATE_PATTERN: &str = "%Y-%m-%d";
/// Format of the date-time wire form, e.g. `2016-01-01T16:30:30`.
pub const DATE_TIME_PATTERN: &str = "%Y-%m-%dT%H:%M:%S";

/// Input text that matches neither wire form.
///
/// Carries the rejected text so callers can name it when they report or
/// log the failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{value:?} is neither a date like 2016-01-01 nor a date-time like 2016-01-01T16:30:30")]
pub struct DecodeError {
    /// The text that failed to decode.
    pub value: String,
}

/// Decodes canonical wire text into an override.
///
/// The date-only form is tried first. Only the exact canonical spelling
/// is accepted: unpadded fields, surrounding whitespace, or trailing
/// text all fail rather than decoding loosely.
pub fn decode(text: &str) -> Result<TimeOverride, DecodeError> {
    let reject = || DecodeError {
        value: text.to_string(),
    };

    let value = if let Ok(date) = NaiveDate::parse_from_str(text, DATE_PATTERN) {
        TimeOverride::FixedDate(date)
    } else if let Ok(date_time) = NaiveDateTime::parse_from_str(text, DATE_TIME_PATTERN) {
        TimeOverride::FixedInstant(date_time)
    } else {
        return Err(reject());
    };

    // chrono's numeric fields tolerate unpadded digits and stray
    // whitespace; only text that reproduces itself on encode is canonical.
    if encode(value) != text {
        return Err(reject());
    }
    Ok(value)
}

/// Encodes an override into its canonical wire text.
pub fn encode(value: TimeOverride) -> String {
    match value {
        TimeOverride::FixedDate(date) => date.format(DATE_PATTERN).to_string(),
        TimeOverride::FixedInstant(date_time) => date_time.format(DATE_TIME_PATTERN).to_string(),
    }
}
