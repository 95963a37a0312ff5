//! Budget CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::budget::format_budget_report;
use crate::error::{ZbbError, ZbbResult};
use crate::models::Money;
use crate::services::{AllocationStatus, BudgetSession};
use crate::storage::Repository;

use super::parse_month_arg;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show budget versus actual spending per category
    Show {
        /// Month to show (e.g. "2025-06"), defaults to the current month
        #[arg(long)]
        month: Option<String>,
    },

    /// Allocate an amount to an expense category
    Set {
        /// Category ID or name
        category: String,
        /// Amount in whole đồng (0 clears the allocation)
        amount: String,
    },
}

/// Handle a budget command
pub fn handle_budget_command<R: Repository>(
    session: &mut BudgetSession<R>,
    settings: &Settings,
    cmd: BudgetCommands,
) -> ZbbResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::Show { month } => {
            let month = parse_month_arg(month.as_deref(), session.month())?;
            let snapshot = session.month_snapshot(month);
            let reports = snapshot.category_reports(session.catalog());

            print!("{}", format_budget_report(month, &reports, symbol));
        }

        BudgetCommands::Set { category, amount } => {
            let amount = Money::parse_non_negative(&amount)
                .map_err(|e| ZbbError::Validation(e.to_string()))?;
            let previous = session.set_budget(&category, amount)?;

            println!(
                "Budget for '{}': {} -> {}",
                category.trim(),
                previous.format_with(symbol),
                amount.format_with(symbol)
            );

            match session.summary().allocation_status() {
                AllocationStatus::Balanced => println!("Every đồng of income is allocated."),
                AllocationStatus::Unallocated(left) => {
                    println!("Still to allocate: {}", left.format_with(symbol))
                }
                AllocationStatus::OverAllocated(over) => {
                    println!("Allocated beyond income by {}", over.format_with(symbol))
                }
            }
        }
    }

    Ok(())
}
