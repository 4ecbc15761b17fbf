use chrono::{NaiveDate, NaiveDateTime};

/// A port that provides the **current date and time** for the application.
///
/// # Purpose
/// This trait abstracts access to "now" so that:
///
/// - Application and domain logic do **not** depend on system time
/// - Implementations can be swapped (virtualized clock, fixed clock, mock, etc.)
/// - Tests can be deterministic and time-independent
///
/// # Design Notes
/// - Answers are naive values in the implementation's reference zone; the
///   zone concept is intentionally delegated to the implementation.
/// - This trait represents an **external capability**, similar to a Repository
///   or Mailer.
///
/// # Typical Implementations
/// - `VirtualClock`: Answers from the per-request override context when one
///   is active, from the real clock otherwise
/// - `FixedClock`: Returns a constant date and time (for testing)
pub trait Clock: Send + Sync {
    /// Returns today's date as a [`NaiveDate`].
    ///
    /// Implementations decide how "today" is determined
    /// (e.g. system time, active override, mocked time source).
    fn today(&self) -> NaiveDate;

    /// Returns the current date and time as a [`NaiveDateTime`].
    fn now(&self) -> NaiveDateTime;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    /// Test implementation of `Clock` that always returns a fixed point in time.
    struct FixedClock {
        at: NaiveDateTime,
    }

    impl FixedClock {
        fn new(at: NaiveDateTime) -> Self {
            Self { at }
        }
    }

    impl Clock for FixedClock {
        fn today(&self) -> NaiveDate {
            self.at.date()
        }

        fn now(&self) -> NaiveDateTime {
            self.at
        }
    }

    #[test]
    fn fixed_clock_returns_given_point_in_time() {
        let at = NaiveDate::from_ymd_opt(2025, 10, 2)
            .unwrap()
            .and_hms_opt(16, 30, 30)
            .unwrap();
        let clock = FixedClock::new(at);

        assert_eq!(clock.now(), at);
        assert_eq!(clock.today(), at.date());
    }

    #[test]
    fn clock_trait_object_works() {
        let at = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let clock: Box<dyn Clock> = Box::new(FixedClock::new(at));

        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }
}
