//! Display formatting for terminal output
//!
//! Tables for transactions, budgets and categories, plus small report
//! helpers such as progress bars and char-safe truncation.

pub mod budget;
pub mod report;
pub mod transaction;

pub use budget::{format_budget_report, format_category_list, format_month_summary};
pub use report::{format_bar, format_money_colored, format_percentage, truncate};
pub use transaction::{format_signed_amount, format_transaction_details, format_transaction_table};
