//! Ledger service
//!
//! The command/query surface used by the UI. Each call loads what it needs
//! from the stores, so there is no cached state to go stale between calls.

use crate::audit::EntityType;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{ExpenseRecord, Income};
use crate::reports::AggregateView;
use crate::storage::Storage;

use super::validator;

/// Service for expense and income operations
pub struct LedgerService<'a> {
    storage: &'a Storage,
}

impl<'a> LedgerService<'a> {
    /// Create a new ledger service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Validate and record a new expense
    pub fn add_expense(
        &self,
        date: &str,
        category: &str,
        amount: &str,
    ) -> LedgerResult<ExpenseRecord> {
        let record = validator::validate_and_normalize(date, category, amount)?;

        self.storage.expenses.append(&record)?;
        self.storage
            .log_create(EntityType::Expense, record.to_string(), &record);

        Ok(record)
    }

    /// List every stored expense in file order, malformed rows included
    pub fn list_expenses(&self) -> LedgerResult<Vec<ExpenseRecord>> {
        self.storage.expenses.load_all()
    }

    /// Delete every expense matching the triple
    ///
    /// Returns the number removed, or `NoMatchingRecord` if nothing matched.
    pub fn delete_expense(&self, date: &str, category: &str, amount: &str) -> LedgerResult<usize> {
        let removed = self
            .storage
            .expenses
            .delete_matching(date, category, amount)?;

        let target = ExpenseRecord::new(date, category, amount);
        if removed == 0 {
            return Err(LedgerError::NoMatchingRecord(target.to_string()));
        }

        self.storage
            .log_delete(EntityType::Expense, target.to_string(), &target, removed);

        Ok(removed)
    }

    /// Remove every expense
    pub fn clear_expenses(&self) -> LedgerResult<()> {
        let dropped = self.storage.expenses.clear_all()?;
        self.storage.log_clear(dropped);
        Ok(())
    }

    /// Store a new monthly income
    pub fn set_income(&self, value: f64) -> LedgerResult<()> {
        let income = validator::check_income(value)?;
        let before = self.storage.income.load();

        self.storage.income.save(income)?;

        if before != income {
            self.storage.log_update(
                EntityType::Income,
                "Monthly income".to_string(),
                &before,
                &income,
                Some(format!("{} -> {}", before, income)),
            );
        }

        Ok(())
    }

    /// Validate income text from the UI and store it
    pub fn set_income_from_input(&self, input: &str) -> LedgerResult<Income> {
        let income = validator::validate_income(input)?;
        self.set_income(income.amount())?;
        Ok(income)
    }

    /// Current monthly income; zero when never set
    pub fn get_income(&self) -> Income {
        self.storage.income.load()
    }

    /// Aggregate view over the current ledger and income
    pub fn dashboard(&self) -> LedgerResult<AggregateView> {
        let records = self.list_expenses()?;
        let income = self.get_income();
        Ok(AggregateView::compute(&records, income))
    }
}
