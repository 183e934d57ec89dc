//! Error types for task domain validation.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TaskDomainError {
    /// The task type is empty after trimming.
    #[error("task type must not be empty")]
    EmptyTaskType,

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The amount is below zero.
    #[error("invalid amount {0}, expected a non-negative number of minor units")]
    NegativeAmount(i64),

    /// The currency is not a three-letter code.
    #[error("invalid currency code '{0}', expected three ASCII letters")]
    InvalidCurrency(String),

    /// The latitude is outside [-90, 90] or not finite.
    #[error("invalid latitude {0}, expected a value between -90 and 90")]
    InvalidLatitude(f64),

    /// The longitude is outside [-180, 180] or not finite.
    #[error("invalid longitude {0}, expected a value between -180 and 180")]
    InvalidLongitude(f64),

    /// The search radius is not a finite positive distance.
    #[error("invalid search radius {0}, expected a positive number of miles")]
    InvalidRadius(f64),

    /// A range predicate has its lower bound above its upper bound.
    #[error("invalid {field} range: lower bound exceeds upper bound")]
    InvertedRange {
        /// Name of the ranged field.
        field: &'static str,
    },
}
