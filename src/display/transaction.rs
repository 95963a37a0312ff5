//! Transaction display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Catalog, Transaction, TransactionType};

use super::report::truncate;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Ngày")]
    date: String,
    #[tabled(rename = "Loại")]
    kind: &'static str,
    #[tabled(rename = "Danh mục")]
    category: String,
    #[tabled(rename = "Diễn giải")]
    description: String,
    #[tabled(rename = "Phương thức")]
    method: &'static str,
    #[tabled(rename = "Số tiền")]
    amount: String,
}

/// Amount as shown in lists: `+` for income, `-` for expense, `±` for debt
pub fn format_signed_amount(txn: &Transaction, symbol: &str) -> String {
    let sign = match txn.kind {
        TransactionType::Income => "+",
        TransactionType::Expense => "-",
        TransactionType::Debt => "±",
    };
    format!("{}{}", sign, txn.amount.format_with(symbol))
}

/// Render transactions as a table
pub fn format_transaction_table(
    transactions: &[&Transaction],
    catalog: &Catalog,
    symbol: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions.iter().map(|txn| TransactionRow {
        id: txn.id.to_string(),
        date: txn.date.format("%Y-%m-%d").to_string(),
        kind: txn.kind.label(),
        category: truncate(catalog.display_name(&txn.category), 24),
        description: truncate(&txn.description, 32),
        method: txn.method.map(|m| m.label()).unwrap_or(""),
        amount: format_signed_amount(txn, symbol),
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// Multi-line details for a single transaction
pub fn format_transaction_details(txn: &Transaction, catalog: &Catalog, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!("Type:        {}\n", txn.kind.label()));
    output.push_str(&format!("Category:    {}\n", catalog.display_name(&txn.category)));
    output.push_str(&format!("Description: {}\n", txn.description));
    if let Some(method) = txn.method {
        output.push_str(&format!("Method:      {}\n", method));
    }
    output.push_str(&format!("Amount:      {}\n", format_signed_amount(txn, symbol)));

    output
}
