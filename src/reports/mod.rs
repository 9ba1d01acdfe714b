//! Reports for the expense ledger
//!
//! Aggregate metrics that drive the dashboard and category charts.

pub mod aggregate;

pub use aggregate::{AggregateView, BudgetBand, CategoryShare, LOW_BAND_LIMIT, MEDIUM_BAND_LIMIT};
