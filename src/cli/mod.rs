//! CLI command handlers
//!
//! Bridges clap argument parsing with the ledger service. The CLI stands in
//! for the form UI: it collects raw strings, calls the service, and renders
//! results or errors.

pub mod expense;
pub mod history;
pub mod income;
pub mod report;

pub use expense::{handle_expense_command, ExpenseCommands};
pub use history::handle_history_command;
pub use income::{handle_income_command, IncomeCommands};
pub use report::{handle_budget_command, handle_chart_command, handle_dashboard_command};

use clap::ValueEnum;
use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};

/// Output format for listings and reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// Serialize a value for a machine-readable output format
///
/// Returns `None` for `Text`, which each command renders itself.
pub fn render_structured<T: Serialize>(
    value: &T,
    format: OutputFormat,
) -> LedgerResult<Option<String>> {
    match format {
        OutputFormat::Text => Ok(None),
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map(Some)
            .map_err(|e| LedgerError::Json(e.to_string())),
        OutputFormat::Yaml => serde_yaml::to_string(value)
            .map(Some)
            .map_err(|e| LedgerError::Json(format!("YAML: {}", e))),
    }
}
