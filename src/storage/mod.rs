//! Storage layer for the expense ledger
//!
//! The expense store is a delimited text file, the income store a single
//! scalar file. Every operation opens, reads or writes, and closes its file
//! while holding the repository lock.

pub mod csv_io;
pub mod expenses;
pub mod income;

pub use expenses::{ExpenseRepository, EXPENSE_HEADER};
pub use income::IncomeRepository;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::LedgerPaths;
use crate::error::LedgerError;

/// Storage coordinator that provides access to both repositories and the
/// audit log
pub struct Storage {
    pub expenses: ExpenseRepository,
    pub income: IncomeRepository,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// Create a new Storage instance with auditing enabled
    pub fn new(paths: LedgerPaths) -> Result<Self, LedgerError> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseRepository::new(paths.expenses_file()),
            income: IncomeRepository::new(paths.income_file()),
            audit: Some(AuditLogger::new(paths.audit_log())),
        })
    }

    /// Disable audit logging
    pub fn without_audit(mut self) -> Self {
        self.audit = None;
        self
    }

    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Create the expense store with its header if needed
    pub fn initialize(&self) -> Result<(), LedgerError> {
        self.expenses.ensure_initialized()
    }

    fn record(&self, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log(&entry) {
                log::warn!("Failed to write audit entry: {}", e);
            }
        }
    }

    /// Record a created entity
    pub fn log_create<T: Serialize>(&self, entity_type: EntityType, name: String, entity: &T) {
        self.record(AuditEntry::create(entity_type, Some(name), entity));
    }

    /// Record an updated entity
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        name: String,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) {
        self.record(AuditEntry::update(
            entity_type,
            Some(name),
            before,
            after,
            diff_summary,
        ));
    }

    /// Record removed entities
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        name: String,
        entity: &T,
        count: usize,
    ) {
        self.record(AuditEntry::delete(entity_type, Some(name), entity, count));
    }

    /// Record that every expense was removed
    pub fn log_clear(&self, count: usize) {
        self.record(AuditEntry::clear(EntityType::Expense, count));
    }
}
