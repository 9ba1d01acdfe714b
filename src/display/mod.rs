//! Display formatting for terminal output
//!
//! Renders ledger data as plain text for the CLI: the expense register, the
//! dashboard summary, and the category chart.

pub mod expense;
pub mod report;

pub use expense::format_expense_register;
pub use report::{
    format_budget_analysis, format_category_chart, format_currency, format_dashboard,
    format_percentage,
};
