//! Monetary amount and currency value types.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-letter, upper-case currency code such as `USD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Creates a validated currency code, normalizing to upper case.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidCurrency`] unless the trimmed value
    /// is exactly three ASCII letters.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        let is_valid =
            normalized.len() == 3 && normalized.chars().all(|ch| ch.is_ascii_alphabetic());
        if !is_valid {
            return Err(TaskDomainError::InvalidCurrency(raw));
        }
        Ok(Self(normalized.to_ascii_uppercase()))
    }

    /// Returns the code as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Non-negative amount in the currency's minor units (for example cents).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    minor_units: i64,
    currency: CurrencyCode,
}

impl Money {
    /// Creates a validated amount.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NegativeAmount`] when `minor_units` is
    /// below zero.
    pub fn new(minor_units: i64, currency: CurrencyCode) -> Result<Self, TaskDomainError> {
        if minor_units < 0 {
            return Err(TaskDomainError::NegativeAmount(minor_units));
        }
        Ok(Self {
            minor_units,
            currency,
        })
    }

    /// Returns the amount in minor units.
    #[must_use]
    pub const fn minor_units(&self) -> i64 {
        self.minor_units
    }

    /// Returns the currency code.
    #[must_use]
    pub const fn currency(&self) -> &CurrencyCode {
        &self.currency
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.minor_units, self.currency)
    }
}
