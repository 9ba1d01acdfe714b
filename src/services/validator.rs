//! Input validation
//!
//! Turns raw form input into an `ExpenseRecord` ready for storage, or into an
//! `Income`. Nothing reaches a store without passing through here.

use crate::error::{LedgerError, LedgerResult};
use crate::models::date;
use crate::models::expense::parse_amount_text;
use crate::models::{ExpenseRecord, Income};

/// Validate raw expense input and normalize it for storage
///
/// All three fields must be non-empty after trimming. The date is rewritten
/// to `DD-MM-YYYY`. The amount must be a plain decimal such as `250`, `-20`
/// or `12.50`; exponents, a leading `+` and bare fractions like `.5` are
/// rejected so the stored text is always a decimal. The category is kept as
/// typed, minus surrounding whitespace.
pub fn validate_and_normalize(
    date_str: &str,
    category_str: &str,
    amount_str: &str,
) -> LedgerResult<ExpenseRecord> {
    let date_str = require("date", date_str)?;
    let category = require("category", category_str)?;
    let amount = require("amount", amount_str)?;

    let date = date::canonicalize(date_str)
        .ok_or_else(|| LedgerError::InvalidDate(date_str.to_string()))?;

    if !is_plain_decimal(amount) {
        return Err(LedgerError::InvalidAmount(amount.to_string()));
    }
    parse_amount(amount)?;

    Ok(ExpenseRecord::new(date, category, amount))
}

/// `-?digits(.digits)?`
fn is_plain_decimal(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    all_digits(whole) && fraction.map_or(true, all_digits)
}

/// Parse an amount, rejecting anything that isn't a finite number
pub fn parse_amount(amount_str: &str) -> LedgerResult<f64> {
    parse_amount_text(amount_str).ok_or_else(|| LedgerError::InvalidAmount(amount_str.to_string()))
}

/// Validate income input: a finite, non-negative number
pub fn validate_income(income_str: &str) -> LedgerResult<Income> {
    let text = require("income", income_str)?;
    check_income(parse_amount(text)?)
}

/// Check that an income value can be stored
pub fn check_income(value: f64) -> LedgerResult<Income> {
    if !value.is_finite() || value < 0.0 {
        return Err(LedgerError::InvalidAmount(value.to_string()));
    }
    Ok(Income::new(value))
}

fn require<'a>(field: &'static str, value: &'a str) -> LedgerResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::MissingField(field));
    }
    Ok(trimmed)
}
