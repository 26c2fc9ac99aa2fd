//! Validation Error Types

use thiserror::Error;

/// Errors during telemetry validation
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    /// Value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Window does not match the trained length
    #[error("window must contain exactly {expected} samples, got {actual}")]
    WindowLength { expected: usize, actual: usize },

    /// Value is NaN or infinite
    #[error("{0} is not a finite number")]
    NotFinite(&'static str),
}
