//! CLI commands for the dashboard and charts

use crate::config::settings::Settings;
use crate::display::{format_budget_analysis, format_category_chart, format_dashboard};
use crate::error::{LedgerError, LedgerResult};
use crate::services::LedgerService;
use crate::storage::Storage;

use super::{render_structured, OutputFormat};

/// Show the dashboard summary
pub fn handle_dashboard_command(
    storage: &Storage,
    settings: &Settings,
    format: OutputFormat,
) -> LedgerResult<()> {
    let view = LedgerService::new(storage).dashboard()?;

    match render_structured(&view, format)? {
        Some(rendered) => println!("{}", rendered),
        None => print!(
            "{}",
            format_dashboard(&view, &settings.currency_symbol, settings.chart_width)
        ),
    }

    Ok(())
}

/// Show totals by category
pub fn handle_chart_command(
    storage: &Storage,
    settings: &Settings,
    format: OutputFormat,
) -> LedgerResult<()> {
    let view = LedgerService::new(storage).dashboard()?;

    match render_structured(&view.category_breakdown(), format)? {
        Some(rendered) => println!("{}", rendered),
        None => print!(
            "{}",
            format_category_chart(&view, &settings.currency_symbol, settings.chart_width)
        ),
    }

    Ok(())
}

/// Show how much of the income has been spent
///
/// Fails with `NoIncomeSet` when no income has been entered.
pub fn handle_budget_command(storage: &Storage, settings: &Settings) -> LedgerResult<()> {
    let view = LedgerService::new(storage).dashboard()?;

    if view.budget_used_percent.is_none() {
        return Err(LedgerError::NoIncomeSet);
    }

    print!("{}", format_budget_analysis(&view, &settings.currency_symbol));
    Ok(())
}
