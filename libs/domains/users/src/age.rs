//! Whole-year age computation and the clock that feeds it.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Completed years between `dob` and `now`, both read as UTC calendar dates.
///
/// The age increments on the birthday itself. A Feb 29 birth compares by
/// (month, day) only, so in non-leap years it ticks over on Mar 1.
/// A date of birth in the future yields 0.
pub fn calculate_age(dob: NaiveDate, now: DateTime<Utc>) -> u32 {
    let today = now.date_naive();
    let mut years = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        years -= 1;
    }
    years.max(0) as u32
}

/// Source of the reference instant used for age computation.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Midnight UTC on the given calendar day.
    pub fn at_date(date: NaiveDate) -> Self {
        Self(date.and_time(chrono::NaiveTime::MIN).and_utc())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
