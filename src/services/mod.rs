//! Service layer
//!
//! Pure aggregation and filtering over a month's transactions, plus the
//! session that owns the mutable state and writes it back to storage.

pub mod aggregator;
pub mod filter;
pub mod session;

pub use aggregator::{
    allocation_balance, category_reports, credit_card_escrow, percent_used, remaining,
    spent_by_category, total_budgeted, total_by_type, total_saved, AllocationStatus,
    CategoryReport, MonthSummary, ProgressLevel,
};
pub use filter::{filter_and_sort, SortDirection, SortField, TransactionFilter};
pub use session::{load_month, BudgetSession, MonthSnapshot};
