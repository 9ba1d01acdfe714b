//! Configuration module for the expense ledger
//!
//! - Path resolution for the settings file, audit log and data files
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::Settings;
