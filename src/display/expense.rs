//! Expense register formatting

use crate::models::ExpenseRecord;

use super::report::{format_currency, truncate};

const CATEGORY_WIDTH: usize = 20;

/// Format a single record as a register row
///
/// Amounts that don't parse are shown verbatim and flagged with `!`.
pub fn format_expense_row(record: &ExpenseRecord, symbol: &str) -> String {
    let (flag, amount) = match record.amount_value() {
        Some(value) => (' ', format_currency(value, symbol)),
        None => ('!', record.amount.clone()),
    };

    format!(
        "{} {:10} {:<width$} {:>14}",
        flag,
        record.date,
        truncate(&record.category, CATEGORY_WIDTH),
        amount,
        width = CATEGORY_WIDTH
    )
}

/// Format records as a register, in stored order
pub fn format_expense_register(records: &[ExpenseRecord], symbol: &str) -> String {
    if records.is_empty() {
        return "No expenses recorded.\n\nUse 'ledger expense add <date> <category> <amount>' to add one.\n"
            .to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "  {:10} {:<width$} {:>14}\n",
        "Date",
        "Category",
        "Amount",
        width = CATEGORY_WIDTH
    ));
    output.push_str(&"-".repeat(48));
    output.push('\n');

    for record in records {
        output.push_str(&format_expense_row(record, symbol));
        output.push('\n');
    }

    let malformed = records.iter().filter(|r| !r.is_well_formed()).count();
    if malformed > 0 {
        output.push_str(&format!(
            "\n! {} row(s) with an unreadable amount are excluded from totals\n",
            malformed
        ));
    }

    output
}
