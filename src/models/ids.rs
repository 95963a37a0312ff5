//! Strongly-typed identifiers
//!
//! Transactions are identified by their creation timestamp in milliseconds;
//! categories by a short static slug such as `groceries`.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Identifier of a transaction (creation time in epoch milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(i64);

impl TransactionId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> i64 {
        self.0
    }

    /// Pick a fresh id from the current timestamp, strictly greater than every
    /// id in `existing` so ids keep increasing even within one millisecond.
    pub fn next_after<'a, I>(now_millis: i64, existing: I) -> Self
    where
        I: IntoIterator<Item = &'a TransactionId>,
    {
        let max_existing = existing.into_iter().map(|id| id.0).max();
        match max_existing {
            Some(max) if max >= now_millis => Self(max + 1),
            _ => Self(now_millis),
        }
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TransactionId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Identifier of a category (static slug)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Borrow<str> for CategoryId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_after_uses_clock_when_ahead() {
        let existing = [TransactionId::new(100), TransactionId::new(200)];
        assert_eq!(TransactionId::next_after(500, &existing), TransactionId::new(500));
    }

    #[test]
    fn test_next_after_bumps_past_existing() {
        let existing = [TransactionId::new(1_000), TransactionId::new(999)];
        assert_eq!(TransactionId::next_after(1_000, &existing), TransactionId::new(1_001));
        assert_eq!(TransactionId::next_after(10, &existing), TransactionId::new(1_001));
    }

    #[test]
    fn test_next_after_empty() {
        assert_eq!(TransactionId::next_after(42, std::iter::empty()), TransactionId::new(42));
    }

    #[test]
    fn test_transaction_id_parse() {
        assert_eq!(" 1718000000000 ".parse::<TransactionId>().unwrap().value(), 1_718_000_000_000);
        assert!("abc".parse::<TransactionId>().is_err());
    }

    #[test]
    fn test_category_id_serializes_as_string() {
        let id = CategoryId::new("groceries");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"groceries\"");
        let back: CategoryId = serde_json::from_str("\"rent\"").unwrap();
        assert_eq!(back.as_str(), "rent");
    }
}
