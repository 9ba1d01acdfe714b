//! Audit trail for the expense ledger
//!
//! Every successful add, delete, clear and income change is appended to
//! `audit.log` as one JSON object per line.
//!
//! - `AuditEntry`: timestamp, operation, entity kind, and the before/after
//!   values of the affected entity.
//! - `AuditLogger`: appends entries and reads them back.
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_ledger::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let entry = AuditEntry::create(EntityType::Expense, Some(record.to_string()), &record);
//! logger.log(&entry)?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
