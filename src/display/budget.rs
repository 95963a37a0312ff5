//! Budget, summary and category formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Catalog, Category, ExpenseGroup, MonthId};
use crate::services::{AllocationStatus, CategoryReport, MonthSummary};

use super::report::{
    format_bar, format_money_colored, format_percentage, level_marker, separator, truncate,
};

const BAR_WIDTH: usize = 12;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Danh mục")]
    category: String,
    #[tabled(rename = "Ngân sách")]
    budgeted: String,
    #[tabled(rename = "Đã chi")]
    spent: String,
    #[tabled(rename = "Còn lại")]
    remaining: String,
    #[tabled(rename = "%")]
    percent: String,
    #[tabled(rename = "")]
    bar: String,
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Tên")]
    name: String,
    #[tabled(rename = "Nhóm")]
    group: String,
}

/// Budget versus actual, one table per expense group
pub fn format_budget_report(month: MonthId, reports: &[CategoryReport], symbol: &str) -> String {
    let mut output = format!("Ngân sách tháng {}\n", month.label());

    for group in ExpenseGroup::all() {
        let rows: Vec<BudgetRow> = reports
            .iter()
            .filter(|r| r.group == *group)
            .map(|r| BudgetRow {
                category: truncate(&r.category_name, 28),
                budgeted: r.budgeted.format_with(symbol),
                spent: r.spent.format_with(symbol),
                remaining: r.remaining.format_with(symbol),
                percent: format!(
                    "{} {}",
                    format_percentage(r.percent_used()),
                    level_marker(r.level)
                )
                .trim_end()
                .to_string(),
                bar: format_bar(r.percent_used(), 100.0, BAR_WIDTH),
            })
            .collect();

        if rows.is_empty() {
            continue;
        }

        let mut table = Table::new(rows);
        table.with(Style::rounded());
        output.push_str(&format!("\n{}\n{}\n", group.label(), table));
    }

    output
}

/// Dashboard figures for a month
pub fn format_month_summary(month: MonthId, summary: &MonthSummary, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Tháng {}\n", month.label()));
    output.push_str(&separator(40));
    output.push('\n');
    output.push_str(&format!("Thu nhập:        {}\n", summary.total_income.format_with(symbol)));
    output.push_str(&format!("Chi tiêu:        {}\n", summary.total_expense.format_with(symbol)));
    if !summary.total_debt.is_zero() {
        output.push_str(&format!("Nợ:              {}\n", summary.total_debt.format_with(symbol)));
    }
    output.push_str(&format!("Còn lại:         {}\n", format_money_colored(summary.net(), symbol)));
    output.push_str(&format!("Đã phân bổ:      {}\n", summary.total_budgeted.format_with(symbol)));
    output.push_str(&format!("Đã tiết kiệm:    {}\n", summary.total_saved.format_with(symbol)));
    output.push_str(&format!(
        "Ký quỹ thẻ tín dụng: {}\n",
        summary.credit_card_escrow.format_with(symbol)
    ));
    output.push_str(&separator(40));
    output.push('\n');

    let status = match summary.allocation_status() {
        AllocationStatus::Balanced => "Mọi đồng thu nhập đã được phân bổ.".to_string(),
        AllocationStatus::Unallocated(amount) => {
            format!("Chưa phân bổ: {}", amount.format_with(symbol))
        }
        AllocationStatus::OverAllocated(amount) => {
            format!("Phân bổ vượt thu nhập: {}", amount.format_with(symbol))
        }
    };
    output.push_str(&status);
    output.push('\n');

    output
}

/// Every category in the catalog with its group
pub fn format_category_list(catalog: &Catalog) -> String {
    let rows = catalog.all().iter().map(|c| CategoryRow {
        id: c.id().to_string(),
        name: c.name().to_string(),
        group: match c {
            Category::Expense { group, .. } => group.label().to_string(),
            _ => c.transaction_type().label().to_string(),
        },
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}
