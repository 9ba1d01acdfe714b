//! Income CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_currency;
use crate::error::LedgerResult;
use crate::services::LedgerService;
use crate::storage::Storage;

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Set monthly income
    Set {
        /// Income amount (e.g. "50000" or "50000.00")
        amount: String,
    },

    /// Show monthly income
    Show,
}

/// Handle an income command
pub fn handle_income_command(
    storage: &Storage,
    settings: &Settings,
    cmd: IncomeCommands,
) -> LedgerResult<()> {
    let service = LedgerService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        IncomeCommands::Set { amount } => {
            let income = service.set_income_from_input(&amount)?;
            println!("Income set to {}", format_currency(income.amount(), symbol));
        }

        IncomeCommands::Show => {
            let income = service.get_income();
            if income.is_set() {
                println!("Monthly income: {}", format_currency(income.amount(), symbol));
            } else {
                println!("No monthly income set.");
                println!("Use 'ledger income set <amount>' to set it.");
            }
        }
    }

    Ok(())
}
