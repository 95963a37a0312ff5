//! Transaction CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::transaction::{format_transaction_details, format_transaction_table};
use crate::error::{ZbbError, ZbbResult};
use crate::models::{PaymentMethod, TransactionDraft, TransactionType};
use crate::services::{BudgetSession, SortDirection, SortField, TransactionFilter};
use crate::storage::Repository;

use super::{parse_month_arg, parse_transaction_id, resolve_category};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a transaction in the current month
    Add {
        /// income, expense or debt
        kind: String,
        /// Category ID or name
        category: String,
        /// Description
        description: String,
        /// Amount in whole đồng (e.g. "250000" or "250.000")
        amount: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Payment method: cash, transfer or credit-card (defaults to cash)
        #[arg(short, long)]
        method: Option<String>,
    },
    /// List transactions
    List {
        /// Only this type (income, expense, debt)
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// Only this category (ID or name)
        #[arg(short = 'C', long)]
        category: Option<String>,
        /// Only this payment method
        #[arg(short, long)]
        method: Option<String>,
        /// Sort by date, amount, name or type
        #[arg(short, long, default_value = "date")]
        sort: String,
        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,
        /// Month to show (e.g. "2025-06"), defaults to the current month
        #[arg(long)]
        month: Option<String>,
    },
    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
    /// Delete every transaction of the current month (budgets are kept)
    Reset {
        /// Confirm the reset
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command<R: Repository>(
    session: &mut BudgetSession<R>,
    settings: &Settings,
    cmd: TransactionCommands,
) -> ZbbResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::Add {
            kind,
            category,
            description,
            amount,
            date,
            method,
        } => {
            let kind: TransactionType = kind.parse()?;
            let date = match date {
                Some(date_str) => parse_date(&date_str)?,
                None => session.today(),
            };
            let method = method.map(|m| m.parse::<PaymentMethod>()).transpose()?;

            let txn = session.add_transaction(TransactionDraft {
                kind,
                category,
                description,
                amount,
                date,
                method,
            })?;

            println!("Created transaction:");
            print!("{}", format_transaction_details(&txn, session.catalog(), symbol));
        }

        TransactionCommands::List {
            kind,
            category,
            method,
            sort,
            asc,
            month,
        } => {
            let mut filter = TransactionFilter::new();
            if let Some(kind) = kind {
                filter = filter.kind(kind.parse()?);
            }
            if let Some(category) = category {
                filter = filter.category(resolve_category(session.catalog(), &category)?);
            }
            if let Some(method) = method {
                filter = filter.method(method.parse()?);
            }

            let field: SortField = sort.parse()?;
            let direction = if asc {
                SortDirection::default().reversed()
            } else {
                SortDirection::default()
            };

            let month = parse_month_arg(month.as_deref(), session.month())?;
            let snapshot = session.month_snapshot(month);
            let view = snapshot.view(&filter, field, direction);

            println!("Giao dịch tháng {}", month.label());
            print!("{}", format_transaction_table(&view, session.catalog(), symbol));
            if !view.is_empty() {
                println!("{} of {} transactions", view.len(), snapshot.transactions.len());
            }
        }

        TransactionCommands::Show { id } => {
            let id = parse_transaction_id(&id)?;
            let txn = session
                .transaction(id)
                .ok_or_else(|| ZbbError::transaction_not_found(id.to_string()))?;
            print!("{}", format_transaction_details(txn, session.catalog(), symbol));
        }

        TransactionCommands::Delete { id } => {
            let id = parse_transaction_id(&id)?;
            let description = session.transaction(id).map(|t| t.description.clone());

            if session.delete_transaction(id) {
                println!(
                    "Deleted transaction: {} ({})",
                    id,
                    description.unwrap_or_default()
                );
            } else {
                println!("No transaction with ID {} in {}; nothing deleted.", id, session.month().label());
            }
        }

        TransactionCommands::Reset { force } => {
            let count = session.transactions().len();
            if !force {
                println!(
                    "About to delete {} transaction(s) from {}. Budgets are kept.",
                    count,
                    session.month().label()
                );
                println!();
                println!("Use --force to confirm the reset");
                return Ok(());
            }

            let cleared = session.reset_month();
            println!("Cleared {} transaction(s) from {}.", cleared, session.month().label());
        }
    }

    Ok(())
}

fn parse_date(date_str: &str) -> ZbbResult<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|_| {
        ZbbError::Validation(format!(
            "Invalid date format: '{}'. Use YYYY-MM-DD",
            date_str
        ))
    })
}
