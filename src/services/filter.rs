//! Filtered and sorted views of a month's transactions

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::ZbbError;
use crate::models::{CategoryId, PaymentMethod, Transaction, TransactionType};

/// Conjunction of optional equality predicates; `None` matches anything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub kind: Option<TransactionType>,
    pub category: Option<CategoryId>,
    pub method: Option<PaymentMethod>,
}

impl TransactionFilter {
    /// A filter that matches every transaction
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn category(mut self, category: impl Into<CategoryId>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn method(mut self, method: PaymentMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        self.kind.map_or(true, |kind| txn.kind == kind)
            && self
                .category
                .as_ref()
                .map_or(true, |category| &txn.category == category)
            && self.method.map_or(true, |method| txn.method == Some(method))
    }
}

/// Column a transaction list can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Date,
    Amount,
    /// The free-text description
    Name,
    Type,
}

impl SortField {
    fn compare(&self, a: &Transaction, b: &Transaction) -> Ordering {
        match self {
            Self::Date => a.date.cmp(&b.date),
            Self::Amount => a.amount.cmp(&b.amount),
            Self::Name => a.description.cmp(&b.description),
            Self::Type => a.kind.key().cmp(b.kind.key()),
        }
    }
}

impl FromStr for SortField {
    type Err = ZbbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "amount" => Ok(Self::Amount),
            "name" | "description" => Ok(Self::Name),
            "type" => Ok(Self::Type),
            other => Err(ZbbError::Validation(format!(
                "Invalid sort field: '{}'. Use date, amount, name or type",
                other
            ))),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Date => "date",
            Self::Amount => "amount",
            Self::Name => "name",
            Self::Type => "type",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn reversed(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl FromStr for SortDirection {
    type Err = ZbbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            other => Err(ZbbError::Validation(format!(
                "Invalid sort direction: '{}'. Use asc or desc",
                other
            ))),
        }
    }
}

/// Filter then stably sort, leaving the input untouched
///
/// Descending order flips the comparator rather than reversing the sorted
/// output, so rows with equal keys keep their original relative order in
/// both directions.
pub fn filter_and_sort<'a>(
    transactions: &'a [Transaction],
    filter: &TransactionFilter,
    field: SortField,
    direction: SortDirection,
) -> Vec<&'a Transaction> {
    let mut view: Vec<&Transaction> = transactions.iter().filter(|t| filter.matches(t)).collect();

    view.sort_by(|a, b| {
        let ordering = field.compare(a, b);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    view
}
