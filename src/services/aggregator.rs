//! Budget aggregation
//!
//! Pure functions over a month's transactions and the budget mapping. Every
//! figure shown on the dashboard, in the budget view and in the export is
//! derived here.

use std::collections::BTreeMap;

use crate::models::{
    Budgets, Catalog, CategoryId, ExpenseGroup, Money, PaymentMethod, Transaction,
    TransactionType, PAY_YOURSELF_FIRST,
};

/// Percentage at which a category is flagged as nearly exhausted
pub const CRITICAL_PERCENT: f64 = 90.0;

/// Percentage at which a category starts to warn
pub const WARNING_PERCENT: f64 = 75.0;

/// Sum of amounts over transactions of one type
pub fn total_by_type(transactions: &[Transaction], kind: TransactionType) -> Money {
    transactions
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

/// Expense totals grouped by category; categories without expenses are absent
pub fn spent_by_category(transactions: &[Transaction]) -> BTreeMap<CategoryId, Money> {
    let mut spent: BTreeMap<CategoryId, Money> = BTreeMap::new();
    for txn in transactions.iter().filter(|t| t.is_expense()) {
        *spent.entry(txn.category.clone()).or_default() += txn.amount;
    }
    spent
}

/// Expense total for a single category
pub fn spent_in_category(transactions: &[Transaction], category: &str) -> Money {
    transactions
        .iter()
        .filter(|t| t.is_expense() && t.category.as_str() == category)
        .map(|t| t.amount)
        .sum()
}

pub fn total_budgeted(budgets: &Budgets) -> Money {
    budgets.total()
}

/// Income minus everything budgeted
///
/// Zero means every unit of income has a job; positive means some income is
/// unallocated; negative means more is budgeted than earned.
pub fn allocation_balance(transactions: &[Transaction], budgets: &Budgets) -> Money {
    total_by_type(transactions, TransactionType::Income) - total_budgeted(budgets)
}

/// Expenses paid by credit card: counted against budgets but not yet settled
pub fn credit_card_escrow(transactions: &[Transaction]) -> Money {
    transactions
        .iter()
        .filter(|t| t.is_expense() && t.method == Some(PaymentMethod::CreditCard))
        .map(|t| t.amount)
        .sum()
}

/// Expenses in the pay-yourself-first categories (savings fund, debt principal)
pub fn total_saved(transactions: &[Transaction]) -> Money {
    transactions
        .iter()
        .filter(|t| t.is_expense() && PAY_YOURSELF_FIRST.contains(&t.category.as_str()))
        .map(|t| t.amount)
        .sum()
}

/// Budget minus spending; negative signals overspend
pub fn remaining(transactions: &[Transaction], budgets: &Budgets, category: &str) -> Money {
    budgets.get(category) - spent_in_category(transactions, category)
}

/// Raw spent/budget ratio in percent; zero when nothing is budgeted
pub fn percent_of_budget(spent: Money, budgeted: Money) -> f64 {
    if budgeted.is_positive() {
        spent.units() as f64 / budgeted.units() as f64 * 100.0
    } else {
        0.0
    }
}

/// Share of the budget used, clamped to 0..=100 for display
pub fn percent_used(transactions: &[Transaction], budgets: &Budgets, category: &str) -> f64 {
    let spent = spent_in_category(transactions, category);
    percent_of_budget(spent, budgets.get(category)).clamp(0.0, 100.0)
}

/// How close a category is to its budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressLevel {
    OnTrack,
    /// A savings category below the warning threshold
    Saving,
    Warning,
    Critical,
}

impl ProgressLevel {
    pub fn classify(percent_used: f64, group: Option<ExpenseGroup>) -> Self {
        if percent_used >= CRITICAL_PERCENT {
            Self::Critical
        } else if percent_used >= WARNING_PERCENT {
            Self::Warning
        } else if group == Some(ExpenseGroup::Savings) {
            Self::Saving
        } else {
            Self::OnTrack
        }
    }
}

/// Outcome of the zero-based allocation check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationStatus {
    Balanced,
    Unallocated(Money),
    OverAllocated(Money),
}

impl AllocationStatus {
    pub fn from_balance(balance: Money) -> Self {
        if balance.is_zero() {
            Self::Balanced
        } else if balance.is_positive() {
            Self::Unallocated(balance)
        } else {
            Self::OverAllocated(balance.abs())
        }
    }
}

/// Dashboard figures for one month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSummary {
    pub total_income: Money,
    pub total_expense: Money,
    pub total_debt: Money,
    pub total_budgeted: Money,
    pub allocation_balance: Money,
    pub credit_card_escrow: Money,
    pub total_saved: Money,
    pub transaction_count: usize,
}

impl MonthSummary {
    pub fn compute(transactions: &[Transaction], budgets: &Budgets) -> Self {
        Self {
            total_income: total_by_type(transactions, TransactionType::Income),
            total_expense: total_by_type(transactions, TransactionType::Expense),
            total_debt: total_by_type(transactions, TransactionType::Debt),
            total_budgeted: total_budgeted(budgets),
            allocation_balance: allocation_balance(transactions, budgets),
            credit_card_escrow: credit_card_escrow(transactions),
            total_saved: total_saved(transactions),
            transaction_count: transactions.len(),
        }
    }

    pub fn allocation_status(&self) -> AllocationStatus {
        AllocationStatus::from_balance(self.allocation_balance)
    }

    /// Income left after expenses
    pub fn net(&self) -> Money {
        self.total_income - self.total_expense
    }
}

/// Budget-versus-actual for one expense category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryReport {
    pub category_id: CategoryId,
    pub category_name: String,
    pub group: ExpenseGroup,
    pub budgeted: Money,
    pub spent: Money,
    pub remaining: Money,
    /// Unclamped spent/budget percentage (0 when unbudgeted)
    pub percent_of_budget: f64,
    pub level: ProgressLevel,
}

impl CategoryReport {
    /// Percentage clamped for progress bars
    pub fn percent_used(&self) -> f64 {
        self.percent_of_budget.clamp(0.0, 100.0)
    }

    pub fn is_overspent(&self) -> bool {
        self.remaining.is_negative()
    }
}

/// One report row per expense category, in Savings, Needs, Wants order
pub fn category_reports(
    transactions: &[Transaction],
    budgets: &Budgets,
    catalog: &Catalog,
) -> Vec<CategoryReport> {
    let spent = spent_by_category(transactions);

    catalog
        .expense_categories()
        .into_iter()
        .filter_map(|category| {
            let group = category.group()?;
            let id = category.id();
            let budgeted = budgets.get(id.as_str());
            let spent = spent.get(id).copied().unwrap_or_default();
            let percent = percent_of_budget(spent, budgeted);

            Some(CategoryReport {
                category_id: id.clone(),
                category_name: category.name().to_string(),
                group,
                budgeted,
                spent,
                remaining: budgeted - spent,
                percent_of_budget: percent,
                level: ProgressLevel::classify(percent.clamp(0.0, 100.0), Some(group)),
            })
        })
        .collect()
}
