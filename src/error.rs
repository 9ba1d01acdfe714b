//! Error types for the expense ledger
//!
//! Every operation exposed to the UI returns a `LedgerResult`, so callers
//! never have to catch failures coming out of the core.

use thiserror::Error;

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// A required input field was empty after trimming
    #[error("Missing field: {0} is required")]
    MissingField(&'static str),

    /// Date input matched neither accepted format
    #[error("Invalid date '{0}': expected YYYY-MM-DD or YYYY/MM/DD")]
    InvalidDate(String),

    /// Amount input was not a number
    #[error("Invalid amount '{0}': must be a number")]
    InvalidAmount(String),

    /// The backing medium could not be read or written
    #[error("I/O error: {0}")]
    Io(String),

    /// A budget metric was requested while income is zero or unset
    #[error("No income set: set a monthly income first")]
    NoIncomeSet,

    /// Delete found nothing to remove
    #[error("No matching record: {0}")]
    NoMatchingRecord(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

/// Coarse error category, for UI code that branches on the kind of failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingField,
    InvalidDate,
    InvalidAmount,
    IoFailure,
    NoIncomeSet,
    NoMatchingRecord,
    Config,
}

impl LedgerError {
    /// Get the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField(_) => ErrorKind::MissingField,
            Self::InvalidDate(_) => ErrorKind::InvalidDate,
            Self::InvalidAmount(_) => ErrorKind::InvalidAmount,
            Self::Io(_) => ErrorKind::IoFailure,
            Self::NoIncomeSet => ErrorKind::NoIncomeSet,
            Self::NoMatchingRecord(_) => ErrorKind::NoMatchingRecord,
            Self::Config(_) | Self::Json(_) => ErrorKind::Config,
        }
    }

    /// Check if this error was caused by bad user input
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingField(_) | Self::InvalidDate(_) | Self::InvalidAmount(_)
        )
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
