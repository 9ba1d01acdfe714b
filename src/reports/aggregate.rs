//! Ledger aggregation
//!
//! Derived metrics over the full record set and the income value. The view is
//! always recomputed from scratch; nothing here is cached or patched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{ExpenseRecord, Income};

/// Budget used at or below this percentage is `Low`
pub const LOW_BAND_LIMIT: f64 = 60.0;

/// Budget used at or below this percentage (and above `LOW_BAND_LIMIT`) is
/// `Medium`; anything higher is `High`
pub const MEDIUM_BAND_LIMIT: f64 = 85.0;

/// Coarse classification of spending relative to income
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetBand {
    Low,
    Medium,
    High,
}

impl BudgetBand {
    pub fn classify(percent: f64) -> Self {
        if percent <= LOW_BAND_LIMIT {
            Self::Low
        } else if percent <= MEDIUM_BAND_LIMIT {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for BudgetBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One slice of the category distribution chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub total: f64,
    /// Percentage of `total_expenses`
    pub share_percent: f64,
}

/// Aggregate metrics over the ledger
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateView {
    /// Sum of every parsable amount
    pub total_expenses: f64,
    /// Per-category sums, iterated in sorted category order
    pub category_totals: BTreeMap<String, f64>,
    /// Number of loaded records, malformed ones included
    pub transaction_count: usize,
    /// Records left out of the sums: unparsable amounts, or amounts that
    /// would overflow a total
    pub excluded_rows: usize,
    pub income: f64,
    /// `None` when income is not set
    pub budget_used_percent: Option<f64>,
    /// `None` when income is not set
    pub budget_band: Option<BudgetBand>,
}

impl AggregateView {
    /// Compute the view from a record set and income value
    pub fn compute(records: &[ExpenseRecord], income: Income) -> Self {
        let mut total_expenses = 0.0;
        let mut category_totals: BTreeMap<String, f64> = BTreeMap::new();
        let mut excluded_rows = 0;

        for record in records {
            let Some(amount) = record.amount_value() else {
                excluded_rows += 1;
                continue;
            };

            // Sums stay finite; an amount that would overflow one is left out
            let category_total = category_totals
                .get(&record.category)
                .copied()
                .unwrap_or(0.0);
            let overflows =
                !(total_expenses + amount).is_finite() || !(category_total + amount).is_finite();
            if overflows {
                log::warn!("Amount {} overflows the ledger totals; excluded", record.amount);
                excluded_rows += 1;
                continue;
            }

            total_expenses += amount;
            category_totals.insert(record.category.clone(), category_total + amount);
        }

        let budget_used_percent = income.is_set().then(|| {
            let percent = total_expenses / income.amount() * 100.0;
            if percent.is_finite() {
                percent
            } else {
                f64::MAX.copysign(percent)
            }
        });

        Self {
            total_expenses,
            category_totals,
            transaction_count: records.len(),
            excluded_rows,
            income: income.amount(),
            budget_used_percent,
            budget_band: budget_used_percent.map(BudgetBand::classify),
        }
    }

    /// Percentage of income spent
    pub fn try_budget_used_percent(&self) -> LedgerResult<f64> {
        self.budget_used_percent.ok_or(LedgerError::NoIncomeSet)
    }

    pub fn try_budget_band(&self) -> LedgerResult<BudgetBand> {
        self.budget_band.ok_or(LedgerError::NoIncomeSet)
    }

    /// Budget used, clamped to `0..=100` for a progress bar
    pub fn progress_percent(&self) -> LedgerResult<f64> {
        Ok(self.try_budget_used_percent()?.clamp(0.0, 100.0))
    }

    /// Each category's share of total spending, in sorted category order
    pub fn category_breakdown(&self) -> Vec<CategoryShare> {
        self.category_totals
            .iter()
            .map(|(category, total)| CategoryShare {
                category: category.clone(),
                total: *total,
                share_percent: if self.total_expenses == 0.0 {
                    0.0
                } else {
                    total / self.total_expenses * 100.0
                },
            })
            .collect()
    }

    /// Whether there is anything to chart
    pub fn has_chart_data(&self) -> bool {
        !self.category_totals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(date: &str, category: &str, amount: &str) -> ExpenseRecord {
        ExpenseRecord::new(date, category, amount)
    }

    #[test]
    fn test_compute_example() {
        let records = vec![
            rec("01-01-2024", "Food", "100.0"),
            rec("01-01-2024", "Travel", "50.0"),
        ];

        let view = AggregateView::compute(&records, Income::new(300.0));

        assert_eq!(view.total_expenses, 150.0);
        assert_eq!(view.category_totals.get("Food"), Some(&100.0));
        assert_eq!(view.category_totals.get("Travel"), Some(&50.0));
        assert_eq!(view.transaction_count, 2);
        assert_eq!(view.try_budget_used_percent().unwrap(), 50.0);
        assert_eq!(view.try_budget_band().unwrap(), BudgetBand::Low);
    }

    #[test]
    fn test_compute_is_pure() {
        let records = vec![rec("01-01-2024", "Food", "12.5"), rec("02-01-2024", "Rent", "x")];

        let first = AggregateView::compute(&records, Income::new(80.0));
        let second = AggregateView::compute(&records, Income::new(80.0));

        assert_eq!(first, second);
    }

    #[test]
    fn test_no_income() {
        let records = vec![rec("01-01-2024", "Food", "10")];
        let view = AggregateView::compute(&records, Income::zero());

        assert!(view.budget_used_percent.is_none());
        assert!(matches!(
            view.try_budget_used_percent(),
            Err(LedgerError::NoIncomeSet)
        ));
        assert!(matches!(view.try_budget_band(), Err(LedgerError::NoIncomeSet)));
        assert!(matches!(view.progress_percent(), Err(LedgerError::NoIncomeSet)));
    }

    #[test]
    fn test_malformed_amounts_excluded() {
        let records = vec![
            rec("01-01-2024", "Food", "20"),
            rec("01-01-2024", "Food", "oops"),
            rec("01-01-2024", "Misc", ""),
        ];

        let view = AggregateView::compute(&records, Income::zero());

        assert_eq!(view.total_expenses, 20.0);
        assert_eq!(view.transaction_count, 3);
        assert_eq!(view.excluded_rows, 2);
        assert_eq!(view.category_totals.len(), 1);
        assert!(!view.category_totals.contains_key("Misc"));
    }

    #[test]
    fn test_categories_are_case_sensitive_and_sorted() {
        let records = vec![
            rec("01-01-2024", "travel", "1"),
            rec("01-01-2024", "Food", "2"),
            rec("01-01-2024", "Travel", "3"),
            rec("01-01-2024", "Food", "4"),
        ];

        let view = AggregateView::compute(&records, Income::zero());
        let order: Vec<&str> = view.category_totals.keys().map(String::as_str).collect();

        assert_eq!(order, vec!["Food", "Travel", "travel"]);
        assert_eq!(view.category_totals["Food"], 6.0);
    }

    #[test]
    fn test_band_thresholds() {
        assert_eq!(BudgetBand::classify(0.0), BudgetBand::Low);
        assert_eq!(BudgetBand::classify(60.0), BudgetBand::Low);
        assert_eq!(BudgetBand::classify(60.01), BudgetBand::Medium);
        assert_eq!(BudgetBand::classify(85.0), BudgetBand::Medium);
        assert_eq!(BudgetBand::classify(85.01), BudgetBand::High);
        assert_eq!(BudgetBand::classify(250.0), BudgetBand::High);
    }

    #[test]
    fn test_progress_is_clamped() {
        let records = vec![rec("01-01-2024", "Rent", "150")];
        let view = AggregateView::compute(&records, Income::new(100.0));

        assert_eq!(view.try_budget_used_percent().unwrap(), 150.0);
        assert_eq!(view.progress_percent().unwrap(), 100.0);
        assert_eq!(view.try_budget_band().unwrap(), BudgetBand::High);

        let refunds = vec![rec("01-01-2024", "Refund", "-10")];
        let view = AggregateView::compute(&refunds, Income::new(100.0));
        assert_eq!(view.progress_percent().unwrap(), 0.0);
    }

    #[test]
    fn test_category_breakdown() {
        let records = vec![
            rec("01-01-2024", "Food", "75"),
            rec("01-01-2024", "Bills", "25"),
        ];

        let shares = AggregateView::compute(&records, Income::zero()).category_breakdown();

        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].category, "Bills");
        assert_eq!(shares[0].share_percent, 25.0);
        assert_eq!(shares[1].share_percent, 75.0);
    }

    #[test]
    fn test_overflowing_amounts_are_excluded() {
        let records = vec![
            rec("01-01-2024", "Big", "1e308"),
            rec("02-01-2024", "Big", "1e308"),
            rec("03-01-2024", "Food", "5"),
        ];

        let view = AggregateView::compute(&records, Income::new(1.0));

        assert_eq!(view.total_expenses, 1e308 + 5.0);
        assert!(view.total_expenses.is_finite());
        assert_eq!(view.excluded_rows, 1);
        assert_eq!(view.transaction_count, 3);
        assert!(view.try_budget_used_percent().unwrap().is_finite());
        assert_eq!(view.try_budget_band().unwrap(), BudgetBand::High);
        assert!(view
            .category_breakdown()
            .iter()
            .all(|share| share.share_percent.is_finite()));
    }

    #[test]
    fn test_empty_ledger() {
        let view = AggregateView::compute(&[], Income::new(100.0));

        assert_eq!(view.total_expenses, 0.0);
        assert_eq!(view.transaction_count, 0);
        assert!(!view.has_chart_data());
        assert_eq!(view.try_budget_used_percent().unwrap(), 0.0);
        assert!(view.category_breakdown().is_empty());
    }
}
