//! Error types for exactla-fraction.

use thiserror::Error;

/// Errors raised when a value cannot become an [`ExactFraction`](crate::ExactFraction).
#[derive(Clone, Debug, PartialEq, Error)]
pub enum FractionError {
    /// NaN or an infinity was supplied.
    #[error("cannot represent non-finite value {0} as a fraction")]
    NonFinite(f64),

    /// The magnitude does not fit in the native integer range.
    #[error("value {0} is outside the native integer range")]
    OutOfRange(f64),

    /// A string literal was not of the form `n`, `n/d` or a decimal.
    #[error("invalid fraction literal: {0:?}")]
    Parse(String),
}
