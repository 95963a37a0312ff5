//! Calendar month identifiers
//!
//! Each month owns its own transaction collection. A `MonthId` knows how to
//! render itself as a storage key suffix (`2025_06`) and as a display label
//! (`6/2025`).

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::clock::Clock;

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthId {
    year: i32,
    month: u32,
}

impl MonthId {
    /// Create a month; `month` must be in 1..=12
    pub fn new(year: i32, month: u32) -> Result<Self, MonthParseError> {
        if !(1..=12).contains(&month) {
            return Err(MonthParseError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month the clock currently reads
    pub fn current(clock: &dyn Clock) -> Self {
        Self::of(clock.today())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Storage key suffix, e.g. `2025_06`
    pub fn key_suffix(&self) -> String {
        format!("{}_{:02}", self.year, self.month)
    }

    /// Human label, e.g. `6/2025`
    pub fn label(&self) -> String {
        format!("{}/{}", self.month, self.year)
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Parse a month
    ///
    /// Formats:
    /// - Key suffix: "2025_06"
    /// - ISO: "2025-06"
    /// - Label: "6/2025"
    pub fn parse(s: &str) -> Result<Self, MonthParseError> {
        let s = s.trim();

        let (year, month) = if let Some((m, y)) = s.split_once('/') {
            (y, m)
        } else if let Some((y, m)) = s.split_once('_').or_else(|| s.split_once('-')) {
            (y, m)
        } else {
            return Err(MonthParseError::InvalidFormat(s.to_string()));
        };

        let year: i32 = year
            .trim()
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .trim()
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;

        Self::new(year, month)
    }
}

impl fmt::Display for MonthId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Errors from parsing a month string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(
                f,
                "Invalid month '{}'. Use YYYY_MM, YYYY-MM or M/YYYY",
                s
            ),
            Self::InvalidMonth(m) => write!(f, "Month must be between 1 and 12, got {}", m),
        }
    }
}

impl std::error::Error for MonthParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    #[test]
    fn test_key_suffix_and_label() {
        let month = MonthId::new(2025, 6).unwrap();
        assert_eq!(month.key_suffix(), "2025_06");
        assert_eq!(month.label(), "6/2025");
        assert_eq!(MonthId::new(2024, 12).unwrap().key_suffix(), "2024_12");
    }

    #[test]
    fn test_current_from_clock() {
        let clock = FixedClock::on(2025, 3, 31);
        assert_eq!(MonthId::current(&clock), MonthId::new(2025, 3).unwrap());
    }

    #[test]
    fn test_contains() {
        let month = MonthId::new(2025, 2).unwrap();
        assert!(month.contains(NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()));
        assert!(!month.contains(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()));
        assert!(!month.contains(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()));
    }

    #[test]
    fn test_navigation_wraps_years() {
        let dec = MonthId::new(2024, 12).unwrap();
        assert_eq!(dec.next(), MonthId::new(2025, 1).unwrap());
        assert_eq!(dec.next().prev(), dec);
    }

    #[test]
    fn test_parse_formats() {
        let expected = MonthId::new(2025, 6).unwrap();
        assert_eq!(MonthId::parse("2025_06").unwrap(), expected);
        assert_eq!(MonthId::parse("2025-06").unwrap(), expected);
        assert_eq!(MonthId::parse("6/2025").unwrap(), expected);
        assert_eq!(MonthId::parse(&expected.label()).unwrap(), expected);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            MonthId::parse("June"),
            Err(MonthParseError::InvalidFormat(_))
        ));
        assert_eq!(
            MonthId::parse("2025_13"),
            Err(MonthParseError::InvalidMonth(13))
        );
    }
}
