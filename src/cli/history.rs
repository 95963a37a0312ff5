//! Audit history command

use crate::audit::AuditLogger;
use crate::error::ZbbResult;

/// Print the most recent audit entries, oldest first
pub fn handle_history_command(logger: &AuditLogger, limit: usize) -> ZbbResult<()> {
    let entries = logger.read_recent(limit)?;

    if entries.is_empty() {
        println!("No history recorded yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
