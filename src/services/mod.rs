//! Service layer for the expense ledger
//!
//! Validation and the command/query operations the UI calls. Services borrow
//! the `Storage` and never hold ledger data between calls.

pub mod ledger;
pub mod validator;

pub use ledger::LedgerService;
pub use validator::{validate_and_normalize, validate_income};
