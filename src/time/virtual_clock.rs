use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::time::clock::Clock;
use crate::time::codec;
use crate::time::context::{self, TimeOverride};
use crate::time::zone::{parse_zone, ZoneError};

/// A [`Clock`] implementation that honors the per-request time override.
///
/// # Overview
/// `VirtualClock` answers every query from the override context first and
/// falls back to the operating system clock when no override is active:
///
/// - No override: the real current time in the reference zone.
/// - Fixed date: the pinned calendar date combined with the real,
///   advancing time-of-day. The date never rolls over midnight on its own.
/// - Fixed instant: the pinned date and time, frozen.
///
/// # Design Notes
/// - The reference zone is fixed at construction time and gives meaning to
///   the naive answers; [`now_at_zone`](VirtualClock::now_at_zone) converts
///   to any other IANA zone on demand.
/// - Repeated queries within one request are each resolved against the
///   override live. With a fixed date, two `now` calls a second apart do
///   differ by that second.
///
/// # Responsibility
/// - Selecting the reference zone is the responsibility of the
///   **composition root**, normally via the configured zone name.
/// - Application and domain logic should treat `Clock` as a trusted source
///   and stay unaware of whether time is currently virtualized.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use delorean_web::time::context::{self, TimeOverride};
/// use delorean_web::time::virtual_clock::VirtualClock;
///
/// let clock = VirtualClock::default();
/// let date = NaiveDate::from_ymd_opt(2016, 1, 1).unwrap();
///
/// let today = context::sync_scope(Some(TimeOverride::FixedDate(date)), || clock.today());
/// assert_eq!(today, date);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualClock {
    zone: Tz,
}

impl VirtualClock {
    /// Creates a clock with the given reference zone.
    pub fn new(zone: Tz) -> Self {
        Self { zone }
    }

    /// Creates a clock from an IANA zone name such as `"Asia/Tokyo"`.
    pub fn with_zone_name(name: &str) -> Result<Self, ZoneError> {
        Ok(Self::new(parse_zone(name)?))
    }

    /// The reference zone this clock answers in.
    pub fn zone(&self) -> Tz {
        self.zone
    }

    /// The current date and time in the reference zone, override-aware.
    pub fn now(&self) -> NaiveDateTime {
        match context::current_override() {
            None => Utc::now().with_timezone(&self.zone).naive_local(),
            Some(TimeOverride::FixedDate(date)) => {
                date.and_time(Utc::now().with_timezone(&self.zone).time())
            }
            Some(TimeOverride::FixedInstant(at)) => at,
        }
    }

    /// The current date in the reference zone, override-aware.
    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }

    /// The current time in the named IANA zone, override-aware.
    ///
    /// With a fixed date, the pinned date is combined with the real
    /// time-of-day in the *target* zone. With a fixed instant, the pinned
    /// value is interpreted in the reference zone and converted. Local
    /// times that fall into a daylight-saving gap are moved forward one
    /// hour; ambiguous local times resolve to the earlier offset.
    pub fn now_at_zone(&self, zone_name: &str) -> Result<DateTime<Tz>, ZoneError> {
        let target = parse_zone(zone_name)?;
        Ok(match context::current_override() {
            None => Utc::now().with_timezone(&target),
            Some(TimeOverride::FixedDate(date)) => {
                let time_of_day = Utc::now().with_timezone(&target).time();
                resolve_local(&target, date.and_time(time_of_day))
            }
            Some(TimeOverride::FixedInstant(at)) => {
                resolve_local(&self.zone, at).with_timezone(&target)
            }
        })
    }

    /// [`today`](VirtualClock::today) in the date wire form, e.g. `2016-01-01`.
    pub fn today_string(&self) -> String {
        self.today().format(codec::DATE_PATTERN).to_string()
    }

    /// [`now`](VirtualClock::now) in the date-time wire form,
    /// e.g. `2016-01-01T16:30:30`.
    pub fn now_string(&self) -> String {
        self.now().format(codec::DATE_TIME_PATTERN).to_string()
    }

    /// Replaces the override for the current context, as
    /// [`context::set_override`] does.
    pub fn set_override(&self, value: TimeOverride) {
        context::set_override(value);
    }

    /// Clears the override for the current context.
    pub fn clear_override(&self) {
        context::clear_override();
    }

    /// Whether an override is active for the current context.
    pub fn is_overridden(&self) -> bool {
        context::is_overridden()
    }

    /// The wire encoding of the active override, or `None` when time is
    /// not currently virtualized.
    pub fn encoded_override(&self) -> Option<String> {
        context::encoded_override()
    }
}

impl Default for VirtualClock {
    /// A clock referenced to UTC.
    fn default() -> Self {
        Self::new(chrono_tz::UTC)
    }
}

impl Clock for VirtualClock {
    fn today(&self) -> NaiveDate {
        VirtualClock::today(self)
    }

    fn now(&self) -> NaiveDateTime {
        VirtualClock::now(self)
    }
}

/// Maps a naive local time onto the zone's timeline without panicking.
///
/// Daylight-saving gaps (the local time never occurred) move forward one
/// hour; folds (the local time occurred twice) take the earlier offset.
fn resolve_local(zone: &Tz, value: NaiveDateTime) -> DateTime<Tz> {
    match zone.from_local_datetime(&value) {
        LocalResult::Single(at) => at,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => zone
            .from_local_datetime(&(value + Duration::hours(1)))
            .earliest()
            .unwrap_or_else(|| zone.from_utc_datetime(&value)),
    }
}
