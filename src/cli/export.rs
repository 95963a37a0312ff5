//! Spreadsheet export command

use std::path::PathBuf;

use tracing::info;

use crate::config::settings::Settings;
use crate::error::ZbbResult;
use crate::export::export_workbook;
use crate::services::BudgetSession;
use crate::storage::Repository;

use super::parse_month_arg;

/// Write the month's workbook to `output_dir`, the configured export
/// directory, or the current directory, in that order of preference
pub fn handle_export_command<R: Repository>(
    session: &BudgetSession<R>,
    settings: &Settings,
    output_dir: Option<PathBuf>,
    month: Option<String>,
) -> ZbbResult<()> {
    let month = parse_month_arg(month.as_deref(), session.month())?;
    let snapshot = session.month_snapshot(month);

    let document = export_workbook(
        &snapshot.transactions,
        &snapshot.budgets,
        session.catalog(),
        &month.label(),
    )?;

    let dir = output_dir
        .or_else(|| settings.export_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let path = document.save_to(&dir)?;

    info!(path = %path.display(), rows = snapshot.transactions.len(), "workbook exported");
    println!(
        "Exported {} transaction(s) for {} to {}",
        snapshot.transactions.len(),
        month.label(),
        path.display()
    );

    Ok(())
}
