//! Time source
//!
//! Month detection and transaction ids read the time through this trait so
//! tests can pin the calendar.

use chrono::{Local, NaiveDate, NaiveTime, TimeZone, Utc};

pub trait Clock {
    /// Today's local calendar date
    fn today(&self) -> NaiveDate;

    /// Current time in epoch milliseconds
    fn now_millis(&self) -> i64;
}

/// The real wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock frozen at midnight UTC of a given date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    date: NaiveDate,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    /// Convenience constructor; impossible dates collapse to `NaiveDate::MIN`
    pub fn on(year: i32, month: u32, day: u32) -> Self {
        Self::new(NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN))
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date
    }

    fn now_millis(&self) -> i64 {
        Utc.from_utc_datetime(&self.date.and_time(NaiveTime::MIN))
            .timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::on(2025, 6, 15);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
        assert_eq!(clock.now_millis(), 1_749_945_600_000);
    }

    #[test]
    fn test_system_clock_is_recent() {
        // 2024-01-01T00:00:00Z
        assert!(SystemClock.now_millis() > 1_704_067_200_000);
    }
}
