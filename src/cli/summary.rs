//! Month summary command

use crate::config::settings::Settings;
use crate::display::budget::format_month_summary;
use crate::error::ZbbResult;
use crate::services::BudgetSession;
use crate::storage::Repository;

use super::parse_month_arg;

pub fn handle_summary_command<R: Repository>(
    session: &BudgetSession<R>,
    settings: &Settings,
    month: Option<String>,
) -> ZbbResult<()> {
    let month = parse_month_arg(month.as_deref(), session.month())?;

    if month == session.month() {
        if let Some(previous) = session.previous_month() {
            println!("New month started (last opened in {}).\n", previous.label());
        }
    }

    let summary = session.month_snapshot(month).summary();
    print!(
        "{}",
        format_month_summary(month, &summary, &settings.currency_symbol)
    );

    Ok(())
}
