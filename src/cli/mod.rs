//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the budget session.

pub mod budget;
pub mod category;
pub mod export;
pub mod history;
pub mod summary;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use export::handle_export_command;
pub use history::handle_history_command;
pub use summary::handle_summary_command;
pub use transaction::{handle_transaction_command, TransactionCommands};

use crate::error::{ZbbError, ZbbResult};
use crate::models::{Catalog, CategoryId, MonthId, TransactionId};

/// Resolve an optional `--month` argument
///
/// Accepts "current", "last", or a month such as "2025-06", "2025_06" or
/// "6/2025"; absent means `current`.
pub(crate) fn parse_month_arg(month: Option<&str>, current: MonthId) -> ZbbResult<MonthId> {
    match month.map(|s| s.trim().to_lowercase()).as_deref() {
        None | Some("current") => Ok(current),
        Some("last") | Some("previous") => Ok(current.prev()),
        Some(other) => MonthId::parse(other).map_err(|e| ZbbError::Validation(e.to_string())),
    }
}

/// Resolve a category given by id or display name
pub(crate) fn resolve_category(catalog: &Catalog, identifier: &str) -> ZbbResult<CategoryId> {
    catalog
        .find(identifier)
        .map(|c| c.id().clone())
        .ok_or_else(|| ZbbError::category_not_found(identifier.trim()))
}

pub(crate) fn parse_transaction_id(id: &str) -> ZbbResult<TransactionId> {
    id.parse()
        .map_err(|_| ZbbError::Validation(format!("Invalid transaction ID: '{}'", id.trim())))
}
