use anyhow::Result;
use clap::{Parser, Subcommand};

use expense_ledger::cli::{
    handle_budget_command, handle_chart_command, handle_dashboard_command,
    handle_expense_command, handle_history_command, handle_income_command, ExpenseCommands,
    IncomeCommands, OutputFormat,
};
use expense_ledger::config::{paths::LedgerPaths, settings::Settings};
use expense_ledger::storage::Storage;

#[derive(Parser)]
#[command(
    name = "ledger",
    version,
    about = "Personal expense ledger with a monthly budget",
    long_about = "Record dated expenses by category, set a monthly income, and see \
                  how much of it you've spent. Data lives in a plain CSV file."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Expense commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Monthly income commands
    #[command(subcommand)]
    Income(IncomeCommands),

    /// Show totals, income and budget used
    #[command(alias = "dash")]
    Dashboard {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show expenses by category
    Chart {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show the percentage of income spent
    Budget,

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Create the data directory, settings and expense file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let initialized = paths.is_initialized();
    let mut storage = Storage::new(paths.clone())?;
    if !settings.audit_enabled {
        storage = storage.without_audit();
    }

    match cli.command {
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, &settings, cmd)?,
        Some(Commands::Income(cmd)) => handle_income_command(&storage, &settings, cmd)?,
        Some(Commands::Dashboard { format }) => {
            handle_dashboard_command(&storage, &settings, format)?
        }
        Some(Commands::Chart { format }) => handle_chart_command(&storage, &settings, format)?,
        Some(Commands::Budget) => handle_budget_command(&storage, &settings)?,
        Some(Commands::History { limit }) => handle_history_command(&storage, limit)?,
        Some(Commands::Init) => {
            storage.initialize()?;
            settings.save(&paths)?;
            println!("Initialized expense ledger at: {}", paths.base_dir().display());
            println!("Expense file: {}", paths.expenses_file().display());
        }
        Some(Commands::Config) => {
            println!("Expense Ledger Configuration");
            println!("============================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Initialized:    {}", if initialized { "yes" } else { "no" });
            println!("Expense file:   {}", paths.expenses_file().display());
            println!("Income file:    {}", paths.income_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Audit enabled:   {}", settings.audit_enabled);
            println!("  Chart width:     {}", settings.chart_width);
        }
        None => {
            println!("Expense Ledger - track expenses against a monthly income");
            println!();
            println!("Run 'ledger --help' for usage information.");
        }
    }

    Ok(())
}
