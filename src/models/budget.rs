//! Budget allocations
//!
//! One process-wide mapping from category id to allocated amount. It is not
//! scoped to a month and survives month resets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ids::CategoryId;
use super::money::Money;
use crate::error::{ZbbError, ZbbResult};

const DEFAULT_ALLOCATIONS: [(&str, i64); 10] = [
    ("saving_fund", 3_000_000),
    ("debt_payoff", 2_000_000),
    ("rent", 2_500_000),
    ("utilities", 800_000),
    ("groceries", 8_000_000),
    ("transport", 1_200_000),
    ("dining_out", 3_000_000),
    ("health", 500_000),
    ("entertainment", 2_000_000),
    ("shopping", 2_000_000),
];

/// Category id -> allocated amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Budgets(BTreeMap<CategoryId, Money>);

impl Budgets {
    /// An empty mapping (every category budgeted at zero)
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Build from `(category, amount)` pairs
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, i64)>,
        K: Into<CategoryId>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(id, amount)| (id.into(), Money::new(amount)))
                .collect(),
        )
    }

    /// Allocated amount for a category; absent categories are budgeted at zero
    pub fn get(&self, id: &str) -> Money {
        self.0.get(id).copied().unwrap_or_default()
    }

    /// Set the allocation for a category
    pub fn set(&mut self, id: CategoryId, amount: Money) -> ZbbResult<Option<Money>> {
        check_allocation(&id, amount)?;
        Ok(self.0.insert(id, amount))
    }

    /// Check every allocation against the rules `set` enforces
    pub fn validate(&self) -> ZbbResult<()> {
        self.0
            .iter()
            .try_for_each(|(id, amount)| check_allocation(id, *amount))
    }

    /// Sum of every allocation
    pub fn total(&self) -> Money {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CategoryId, &Money)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn check_allocation(id: &CategoryId, amount: Money) -> ZbbResult<()> {
    if amount.is_negative() {
        return Err(ZbbError::Validation(format!(
            "Budget for '{}' cannot be negative",
            id
        )));
    }
    if amount.units() > Money::MAX_AMOUNT {
        return Err(ZbbError::Validation(format!(
            "Budget for '{}' exceeds the maximum of {}",
            id,
            Money::new(Money::MAX_AMOUNT)
        )));
    }
    Ok(())
}

impl Default for Budgets {
    /// The starter allocation table
    fn default() -> Self {
        Self::from_pairs(DEFAULT_ALLOCATIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let budgets = Budgets::default();
        assert_eq!(budgets.len(), 10);
        assert_eq!(budgets.get("groceries"), Money::new(8_000_000));
        assert_eq!(budgets.total(), Money::new(25_000_000));
    }

    #[test]
    fn test_absent_category_is_zero() {
        let budgets = Budgets::empty();
        assert_eq!(budgets.get("rent"), Money::zero());
        assert_eq!(budgets.total(), Money::zero());
    }

    #[test]
    fn test_set_rejects_negative() {
        let mut budgets = Budgets::empty();
        assert!(budgets.set("rent".into(), Money::new(-1)).is_err());

        let previous = budgets.set("rent".into(), Money::new(100)).unwrap();
        assert_eq!(previous, None);
        let previous = budgets.set("rent".into(), Money::new(0)).unwrap();
        assert_eq!(previous, Some(Money::new(100)));
    }

    #[test]
    fn test_validate_flags_out_of_range_allocations() {
        assert!(Budgets::default().validate().is_ok());
        assert!(Budgets::from_pairs([("rent", 0)]).validate().is_ok());

        let negative: Budgets = serde_json::from_str(r#"{"rent": -5}"#).unwrap();
        assert!(negative.validate().unwrap_err().is_validation());

        let huge = Budgets::from_pairs([("rent", Money::MAX_AMOUNT + 1)]);
        assert!(huge.validate().is_err());
        assert!(Budgets::empty().set("rent".into(), Money::new(Money::MAX_AMOUNT + 1)).is_err());
    }

    #[test]
    fn test_json_is_plain_object() {
        let budgets = Budgets::from_pairs([("rent", 2_500_000)]);
        assert_eq!(serde_json::to_string(&budgets).unwrap(), r#"{"rent":2500000}"#);

        let back: Budgets = serde_json::from_str(r#"{"groceries": 10}"#).unwrap();
        assert_eq!(back.get("groceries"), Money::new(10));
    }
}
