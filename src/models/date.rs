//! Expense dates
//!
//! Dates are entered as `YYYY-MM-DD` (or `YYYY/MM/DD`) and stored in the
//! canonical `DD-MM-YYYY` form. Stored dates are never parsed back; they are
//! only displayed and compared as strings.

use chrono::NaiveDate;

/// Accepted input formats, tried in order
pub const INPUT_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Storage and display format
pub const CANONICAL_DATE_FORMAT: &str = "%d-%m-%Y";

/// Parse a date entered by the user
///
/// The year must be written with four digits; month and day may omit the
/// leading zero.
pub fn parse_input_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    let year = input.split(['-', '/']).next()?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    INPUT_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
}

/// Render a date in the canonical `DD-MM-YYYY` form
pub fn format_canonical(date: NaiveDate) -> String {
    date.format(CANONICAL_DATE_FORMAT).to_string()
}

/// Convert user input directly to its canonical form
pub fn canonicalize(input: &str) -> Option<String> {
    parse_input_date(input).map(format_canonical)
}
