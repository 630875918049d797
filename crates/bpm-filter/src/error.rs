//! Filter Error Types

use thiserror::Error;

/// Errors raised by the estimator core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// Measurement is NaN or infinite
    #[error("Invalid measurement: {value} is not a finite number")]
    InvalidInput { value: f64 },

    /// Tuning parameter violates its constraint
    #[error("Invalid configuration: {field} = {value} ({reason})")]
    InvalidConfiguration {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}
