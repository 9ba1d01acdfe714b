//! Report formatting utilities for terminal output

use crate::reports::{AggregateView, BudgetBand};

/// Format an amount with a currency symbol, thousands separators and two
/// decimals, e.g. `₹1,234.50`
pub fn format_currency(amount: f64, symbol: &str) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // -0.00 prints without a sign
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}{}.{}", sign, symbol, grouped, cents)
}

/// Format a percentage to one decimal place
pub fn format_percentage(pct: f64) -> String {
    format!("{:.1}%", pct)
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

fn band_label(band: BudgetBand) -> &'static str {
    match band {
        BudgetBand::Low => "on track",
        BudgetBand::Medium => "watch spending",
        BudgetBand::High => "over budget risk",
    }
}

/// Format the dashboard summary
pub fn format_dashboard(view: &AggregateView, symbol: &str, bar_width: usize) -> String {
    let mut output = String::new();
    output.push_str("Expense Dashboard\n");
    output.push_str(&double_separator(44));
    output.push('\n');

    output.push_str(&format!(
        "Total Expenses:  {}\n",
        format_currency(view.total_expenses, symbol)
    ));
    output.push_str(&format!(
        "Monthly Income:  {}\n",
        format_currency(view.income, symbol)
    ));
    output.push_str(&format!("Transactions:    {}\n", view.transaction_count));

    match (view.budget_used_percent, view.budget_band) {
        (Some(pct), Some(band)) => {
            output.push_str(&format!("Budget Used:     {}\n", format_percentage(pct)));
            output.push_str(&format!(
                "Progress:        {} {} ({})\n",
                format_bar(pct.clamp(0.0, 100.0), 100.0, bar_width),
                band,
                band_label(band)
            ));
        }
        _ => {
            output.push_str("Budget Used:     Set Income\n");
            output.push_str(&format!("Progress:        {}\n", format_bar(0.0, 100.0, bar_width)));
        }
    }

    if view.excluded_rows > 0 {
        output.push_str(&format!(
            "\n! {} row(s) excluded from totals (unreadable amount)\n",
            view.excluded_rows
        ));
    }

    output
}

/// Format per-category totals as a horizontal bar chart
pub fn format_category_chart(view: &AggregateView, symbol: &str, bar_width: usize) -> String {
    if !view.has_chart_data() {
        return "No expenses to visualize.\n".to_string();
    }

    let shares = view.category_breakdown();
    let name_width = shares
        .iter()
        .map(|s| s.category.chars().count())
        .max()
        .unwrap_or(8)
        .clamp(8, 24);
    let max_total = shares.iter().map(|s| s.total).fold(0.0_f64, f64::max);

    let mut output = String::new();
    output.push_str("Expenses by Category\n");
    output.push_str(&separator(name_width + bar_width + 26));
    output.push('\n');

    for share in &shares {
        output.push_str(&format!(
            "{:<name_width$} {} {:>14} {:>7}\n",
            truncate(&share.category, name_width),
            format_bar(share.total, max_total, bar_width),
            format_currency(share.total, symbol),
            format_percentage(share.share_percent),
            name_width = name_width
        ));
    }

    output
}

/// Format the spent-percentage analysis
///
/// Callers check that income is set first; without it only the totals are
/// shown.
pub fn format_budget_analysis(view: &AggregateView, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Total Expenses: {}\n",
        format_currency(view.total_expenses, symbol)
    ));
    output.push_str(&format!(
        "Monthly Income: {}\n",
        format_currency(view.income, symbol)
    ));
    if let Some(pct) = view.budget_used_percent {
        output.push_str(&format!("Budget Used:    {}\n", format_percentage(pct)));
    }
    output
}
