//! Money type for representing currency amounts
//!
//! Amounts are whole currency units (đồng) stored as `i64`. No fractional
//! amounts exist, so every calculation is exact integer arithmetic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use thiserror::Error;

/// A monetary amount in whole currency units
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const fn new(units: i64) -> Self {
        Self(units)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the raw amount in whole units
    pub const fn units(&self) -> i64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Largest amount a form accepts: one quadrillion đồng
    ///
    /// Keeps sums of many transactions far away from `i64` overflow.
    pub const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

    /// Parse a strictly positive whole amount as typed into a form
    ///
    /// Accepts plain digits or digits grouped in thousands with one of
    /// `.`/`,`/space/`_` ("2500000", "2.500.000", "2 500 000"). Anything
    /// that looks like a decimal ("1.5", "12,50") is rejected.
    pub fn parse_positive(s: &str) -> Result<Self, MoneyParseError> {
        let amount = Self::parse_non_negative(s)?;
        if amount.is_zero() {
            return Err(MoneyParseError::NotPositive);
        }
        Ok(amount)
    }

    /// Like [`Money::parse_positive`] but accepts zero, for budget allocations
    pub fn parse_non_negative(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let invalid = || MoneyParseError::InvalidFormat(trimmed.to_string());
        let digits = strip_thousands_separators(trimmed).ok_or_else(invalid)?;

        let units: i64 = digits.parse().map_err(|_| MoneyParseError::TooLarge)?;
        if units > Self::MAX_AMOUNT {
            return Err(MoneyParseError::TooLarge);
        }
        Ok(Self(units))
    }

    /// Format with vi-VN digit grouping and the given currency symbol
    pub fn format_with(&self, symbol: &str) -> String {
        let grouped = group_thousands(self.0.unsigned_abs());
        let sign = if self.0 < 0 { "-" } else { "" };
        if symbol.is_empty() {
            format!("{}{}", sign, grouped)
        } else {
            format!("{}{} {}", sign, grouped, symbol)
        }
    }
}

/// Digits of `s` with thousands separators removed, or `None` when the
/// grouping is not `d{1,3}(<sep>ddd)*` with a single separator character
fn strip_thousands_separators(s: &str) -> Option<String> {
    let separator = s.chars().find(|c| !c.is_ascii_digit());

    let Some(separator) = separator else {
        return Some(s.to_string());
    };
    if !matches!(separator, '.' | ',' | ' ' | '_') {
        return None;
    }

    let mut groups = s.split(separator);
    let first = groups.next()?;
    if first.is_empty() || first.len() > 3 || !first.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut digits = first.to_string();
    for group in groups {
        if group.len() != 3 || !group.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.push_str(group);
    }
    Some(digits)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with("₫"))
    }
}

impl From<i64> for Money {
    fn from(units: i64) -> Self {
        Self(units)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, m| acc + *m)
    }
}

/// Errors from parsing a form amount
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    #[error("Amount is required")]
    Empty,

    #[error("Invalid amount: '{0}' (use whole đồng, e.g. 250000 or 250.000)")]
    InvalidFormat(String),

    #[error("Amount must be greater than zero")]
    NotPositive,

    #[error("Amount exceeds the maximum of {}", Money::new(Money::MAX_AMOUNT))]
    TooLarge,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Money::new(0).to_string(), "0 ₫");
        assert_eq!(Money::new(999).to_string(), "999 ₫");
        assert_eq!(Money::new(2_500_000).to_string(), "2.500.000 ₫");
        assert_eq!(Money::new(-1_000).to_string(), "-1.000 ₫");
    }

    #[test]
    fn test_format_without_symbol() {
        assert_eq!(Money::new(10_500_000).format_with(""), "10.500.000");
        assert_eq!(Money::new(1_234).format_with("VND"), "1.234 VND");
    }

    #[test]
    fn test_parse_positive() {
        assert_eq!(Money::parse_positive("2500000"), Ok(Money::new(2_500_000)));
        assert_eq!(Money::parse_positive(" 2.500.000 "), Ok(Money::new(2_500_000)));
        assert_eq!(Money::parse_positive("1 000"), Ok(Money::new(1_000)));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(Money::parse_positive(""), Err(MoneyParseError::Empty));
        assert_eq!(Money::parse_positive("   "), Err(MoneyParseError::Empty));
        assert_eq!(Money::parse_positive("0"), Err(MoneyParseError::NotPositive));
        assert!(matches!(
            Money::parse_positive("abc"),
            Err(MoneyParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            Money::parse_positive("-500"),
            Err(MoneyParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_non_negative_accepts_zero() {
        assert_eq!(Money::parse_non_negative("0"), Ok(Money::zero()));
        assert_eq!(Money::parse_non_negative("3.000.000"), Ok(Money::new(3_000_000)));
        assert!(Money::parse_non_negative("-1").is_err());
    }

    #[test]
    fn test_parse_rejects_decimal_looking_input() {
        for input in ["1.5", "12,50", "1.0.0.0", "2.500.00", "1.000,000", "1..000", ".500", "500.", "1 5"] {
            assert!(
                matches!(Money::parse_positive(input), Err(MoneyParseError::InvalidFormat(_))),
                "{input} should be rejected"
            );
        }
        assert_eq!(Money::parse_positive("2.500.000"), Ok(Money::new(2_500_000)));
        assert_eq!(Money::parse_positive("12,500"), Ok(Money::new(12_500)));
        assert_eq!(Money::parse_positive("10_500_000"), Ok(Money::new(10_500_000)));
    }

    #[test]
    fn test_parse_enforces_maximum() {
        assert_eq!(
            Money::parse_positive("1.000.000.000.000.000"),
            Ok(Money::new(Money::MAX_AMOUNT))
        );
        assert_eq!(
            Money::parse_positive("1000000000000001"),
            Err(MoneyParseError::TooLarge)
        );
        assert_eq!(
            Money::parse_positive("9000000000000000000"),
            Err(MoneyParseError::TooLarge)
        );
        assert_eq!(
            Money::parse_positive("99999999999999999999999"),
            Err(MoneyParseError::TooLarge)
        );
    }

    #[test]
    fn test_sum_saturates_instead_of_overflowing() {
        let huge = Money::new(9_000_000_000_000_000_000);
        let total: Money = [huge, huge].iter().sum();
        assert_eq!(total, Money::new(i64::MAX));
        assert_eq!(Money::new(i64::MIN) - Money::new(1), Money::new(i64::MIN));
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let total: Money = [Money::new(1), Money::new(2), Money::new(3)].iter().sum();
        assert_eq!(total, Money::new(6));
        assert_eq!(Money::new(5) - Money::new(8), Money::new(-3));
        assert_eq!(-Money::new(4), Money::new(-4));
    }
}
