//! Expense Ledger - personal expense tracking with a monthly budget
//!
//! The core of a single-user expense tracker: dated expense records with a
//! category and amount, a monthly income figure, and the budget metrics
//! derived from them.
//!
//! # Architecture
//!
//! - `config`: Configuration and path management
//! - `error`: Error types
//! - `models`: Expense records, income, date normalization
//! - `storage`: Delimited-file expense store and scalar income store
//! - `services`: Input validation and the ledger command/query service
//! - `reports`: Aggregate metrics (totals, per-category sums, budget bands)
//! - `audit`: Append-only audit trail of changes
//! - `display`: Plain-text rendering for the terminal
//! - `cli`: Command handlers for the `ledger` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_ledger::config::LedgerPaths;
//! use expense_ledger::services::LedgerService;
//! use expense_ledger::storage::Storage;
//!
//! let storage = Storage::new(LedgerPaths::new()?)?;
//! let ledger = LedgerService::new(&storage);
//! ledger.add_expense("2024-01-15", "Food & Dining", "250")?;
//! ledger.set_income(30000.0)?;
//! let view = ledger.dashboard()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{ErrorKind, LedgerError, LedgerResult};
