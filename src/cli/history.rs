//! Audit history command

use crate::error::LedgerResult;
use crate::storage::Storage;

/// Print the most recent audit entries
pub fn handle_history_command(storage: &Storage, limit: usize) -> LedgerResult<()> {
    let Some(logger) = storage.audit() else {
        println!("Audit logging is disabled.");
        return Ok(());
    };

    let entries = logger.read_recent(limit)?;
    if entries.is_empty() {
        println!("No history recorded yet.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
