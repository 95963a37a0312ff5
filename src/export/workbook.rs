//! Monthly budget workbook
//!
//! Builds the two-sheet export: the month's transactions with income and
//! expense totals, and budget versus actual for every expense category.

use std::path::{Path, PathBuf};

use crate::error::ZbbResult;
use crate::models::{Budgets, Catalog, Transaction, TransactionType};
use crate::services::aggregator::{category_reports, total_by_type};
use crate::storage::write_atomic;

use super::spreadsheet::{Cell, Row, Workbook, Worksheet};

pub const EXPORT_MIME_TYPE: &str = "application/vnd.ms-excel";

pub const TRANSACTIONS_SHEET: &str = "Giao Dịch";
pub const BUDGET_SHEET: &str = "Ngân Sách";

pub const TOTAL_INCOME_LABEL: &str = "TỔNG THU";
pub const TOTAL_EXPENSE_LABEL: &str = "TỔNG CHI";
pub const NET_LABEL: &str = "CÒN LẠI";
pub const TOTAL_DEBT_LABEL: &str = "TỔNG NỢ";

const TRANSACTION_HEADERS: [&str; 6] = [
    "Ngày",
    "Loại",
    "Danh mục",
    "Diễn giải",
    "Phương thức",
    "Số tiền (VNĐ)",
];

const BUDGET_HEADERS: [&str; 6] = [
    "Nhóm",
    "Danh mục",
    "Ngân sách",
    "Đã chi",
    "Còn lại",
    "% Sử dụng",
];

/// A rendered export ready to be saved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub file_name: String,
    pub mime_type: &'static str,
    pub contents: String,
}

impl ExportDocument {
    /// Write the document into `dir`, returning the full path
    pub fn save_to(&self, dir: &Path) -> ZbbResult<PathBuf> {
        let path = dir.join(&self.file_name);
        write_atomic(&path, self.contents.as_bytes())?;
        Ok(path)
    }
}

/// `ZBB_<label>.xls` with every `/` in the label replaced by `-`
pub fn export_file_name(month_label: &str) -> String {
    format!("ZBB_{}.xls", month_label.replace('/', "-"))
}

/// Render the month's workbook
///
/// Debt rows carry their unsigned amount and stay out of the income and
/// expense totals; a separate debt total is added when any exist.
pub fn export_workbook(
    transactions: &[Transaction],
    budgets: &Budgets,
    catalog: &Catalog,
    month_label: &str,
) -> ZbbResult<ExportDocument> {
    let mut workbook = Workbook::new();
    workbook.add_worksheet(transactions_sheet(transactions, catalog));
    workbook.add_worksheet(budget_sheet(transactions, budgets, catalog));

    Ok(ExportDocument {
        file_name: export_file_name(month_label),
        mime_type: EXPORT_MIME_TYPE,
        contents: workbook.to_xml()?,
    })
}

fn transactions_sheet(transactions: &[Transaction], catalog: &Catalog) -> Worksheet {
    let mut sheet = Worksheet::new(TRANSACTIONS_SHEET);
    sheet.push(Row::header(TRANSACTION_HEADERS));

    for txn in transactions {
        sheet.push(Row::new(vec![
            Cell::text(txn.date.format("%Y-%m-%d").to_string()),
            Cell::from(txn.kind.label()),
            Cell::from(catalog.display_name(&txn.category)),
            Cell::text(txn.description.as_str()),
            Cell::from(txn.method.map(|m| m.label()).unwrap_or("")),
            Cell::Number(txn.signed_amount().units()),
        ]));
    }

    let income = total_by_type(transactions, TransactionType::Income);
    let expense = total_by_type(transactions, TransactionType::Expense);
    let debt = total_by_type(transactions, TransactionType::Debt);

    sheet.push(Row::blank());
    sheet.push(summary_row(TOTAL_INCOME_LABEL, income.units()));
    sheet.push(summary_row(TOTAL_EXPENSE_LABEL, expense.units()));
    sheet.push(summary_row(NET_LABEL, (income - expense).units()));
    if transactions.iter().any(|t| t.kind == TransactionType::Debt) {
        sheet.push(summary_row(TOTAL_DEBT_LABEL, debt.units()));
    }

    sheet
}

fn summary_row(label: &str, value: i64) -> Row {
    let mut cells: Vec<Cell> = std::iter::repeat_with(|| Cell::from("")).take(4).collect();
    cells.push(Cell::from(label));
    cells.push(Cell::Number(value));
    Row::new(cells)
}

fn budget_sheet(transactions: &[Transaction], budgets: &Budgets, catalog: &Catalog) -> Worksheet {
    let mut sheet = Worksheet::new(BUDGET_SHEET);
    sheet.push(Row::header(BUDGET_HEADERS));

    for report in category_reports(transactions, budgets, catalog) {
        let percent = if report.budgeted.is_positive() {
            format!("{:.1}%", report.percent_of_budget)
        } else {
            "0%".to_string()
        };

        sheet.push(Row::new(vec![
            Cell::from(report.group.label()),
            Cell::text(report.category_name),
            Cell::Number(report.budgeted.units()),
            Cell::Number(report.spent.units()),
            Cell::Number(report.remaining.units()),
            Cell::text(percent),
        ]));
    }

    sheet
}
