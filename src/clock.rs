//! Clock abstraction for testable timestamps and year prefixes.

use chrono::{DateTime, Datelike, TimeZone, Utc};

/// A clock that provides the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar year used by year-prefixed short IDs.
    fn year(&self) -> i32 {
        self.now().year()
    }
}

/// Real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    at: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self { at }
    }

    /// Midday on the first of June of `year`, or the epoch if `year` is out of range.
    pub fn in_year(year: i32) -> Self {
        let at = Utc
            .with_ymd_and_hms(year, 6, 1, 12, 0, 0)
            .single()
            .unwrap_or(DateTime::UNIX_EPOCH);
        Self { at }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.at
    }
}
