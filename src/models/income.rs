//! Monthly income model
//!
//! A single non-negative scalar. An absent or unreadable income store reads
//! as zero, which means "not set" for budget metrics.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The user's monthly income
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Income(f64);

impl Income {
    pub const fn new(amount: f64) -> Self {
        Self(amount)
    }

    pub const fn zero() -> Self {
        Self(0.0)
    }

    pub const fn amount(&self) -> f64 {
        self.0
    }

    /// Whether budget metrics can be computed against this income
    pub fn is_set(&self) -> bool {
        self.0 > 0.0
    }
}

impl fmt::Display for Income {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
