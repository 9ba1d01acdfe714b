//! Expense CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_currency, format_expense_register};
use crate::error::LedgerResult;
use crate::services::LedgerService;
use crate::storage::Storage;

use super::{render_structured, OutputFormat};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Date (YYYY-MM-DD or YYYY/MM/DD)
        date: String,
        /// Category (e.g. "Food & Dining", "Transportation")
        category: String,
        /// Amount (e.g. "250" or "250.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// List all expenses
    #[command(alias = "ls")]
    List {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Delete every expense matching date, category and amount exactly
    #[command(alias = "rm")]
    Delete {
        /// Date as listed (DD-MM-YYYY)
        date: String,
        category: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Confirm the deletion
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete all expenses
    Clear {
        /// Confirm clearing the whole ledger
        #[arg(short, long)]
        yes: bool,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> LedgerResult<()> {
    let service = LedgerService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            date,
            category,
            amount,
        } => {
            let record = service.add_expense(&date, &category, &amount)?;
            let value = record.amount_value().unwrap_or_default();

            println!("Expense added:");
            println!("  Date:     {}", record.date);
            println!("  Category: {}", record.category);
            println!("  Amount:   {}", format_currency(value, symbol));
        }

        ExpenseCommands::List { format } => {
            let records = service.list_expenses()?;
            match render_structured(&records, format)? {
                Some(rendered) => println!("{}", rendered),
                None => print!("{}", format_expense_register(&records, symbol)),
            }
        }

        ExpenseCommands::Delete {
            date,
            category,
            amount,
            yes,
        } => {
            if !yes {
                println!("Delete record: {}, {}, {}{}?", date, category, symbol, amount);
                println!("Re-run with --yes to confirm.");
                return Ok(());
            }

            let removed = service.delete_expense(&date, &category, &amount)?;
            if removed == 1 {
                println!("Record deleted.");
            } else {
                println!("{} identical records deleted.", removed);
            }
        }

        ExpenseCommands::Clear { yes } => {
            if !yes {
                println!("This will delete all expense records.");
                println!("Re-run with --yes to confirm.");
                return Ok(());
            }

            service.clear_expenses()?;
            println!("All records cleared.");
        }
    }

    Ok(())
}
