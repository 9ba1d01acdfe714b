//! Core data models for the expense ledger

pub mod date;
pub mod expense;
pub mod income;

pub use expense::ExpenseRecord;
pub use income::Income;
