//! Expense record model
//!
//! A record keeps its amount as the exact text that was stored. Records read
//! back from disk may carry an amount that doesn't parse; they are still
//! listed, but aggregation skips them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One expense entry: date, category, amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Date in canonical `DD-MM-YYYY` form
    pub date: String,
    /// Free-text category label
    pub category: String,
    /// Amount as stored text
    pub amount: String,
}

impl ExpenseRecord {
    pub fn new(
        date: impl Into<String>,
        category: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            category: category.into(),
            amount: amount.into(),
        }
    }

    /// Numeric amount, or `None` if the stored text is not a finite number
    pub fn amount_value(&self) -> Option<f64> {
        parse_amount_text(&self.amount)
    }

    /// Whether the amount parses and the record counts toward totals
    pub fn is_well_formed(&self) -> bool {
        self.amount_value().is_some()
    }

    /// Check whether this record matches a (date, category, amount) triple
    ///
    /// Date and category compare as exact strings. Amounts compare by value
    /// when both sides parse, so `100` matches `100.0`; otherwise the raw
    /// text must match.
    pub fn matches(&self, date: &str, category: &str, amount: &str) -> bool {
        if self.date != date || self.category != category {
            return false;
        }

        match (self.amount_value(), parse_amount_text(amount)) {
            (Some(stored), Some(given)) => stored == given,
            _ => self.amount.trim() == amount.trim(),
        }
    }
}

impl fmt::Display for ExpenseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.date, self.category, self.amount)
    }
}

/// Parse amount text as a finite floating-point number
pub fn parse_amount_text(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
