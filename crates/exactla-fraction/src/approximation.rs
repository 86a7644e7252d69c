//! Conversion from floating point literals.
//!
//! A binary `f64` rarely equals the decimal the user typed, so conversion
//! searches for the best rational approximation with a bounded denominator
//! using continued fraction convergents. The search stops as soon as a
//! convergent reproduces the `f64` exactly, which recovers `0.1` as `1/10`
//! rather than `3602879701896397/36028797018963968`.
//!
//! ## Precision
//!
//! The returned fraction `p/q` satisfies `q <= max_denominator` and
//! `|value - p/q| < 1 / max_denominator`.

use crate::{ExactFraction, FractionError};

/// Upper bound on the number of continued fraction terms examined.
///
/// Convergent denominators grow at least as fast as the Fibonacci numbers,
/// so 64 terms exceed every `i64` denominator.
const MAX_TERMS: usize = 64;

/// 2^63, the first magnitude that no longer fits in `i64`.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Configuration for float to fraction conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApproximationConfig {
    /// Largest denominator the approximation may use.
    pub max_denominator: i64,
}

impl Default for ApproximationConfig {
    fn default() -> Self {
        Self {
            max_denominator: 1_000_000,
        }
    }
}

impl ApproximationConfig {
    /// Creates a configuration with the given denominator bound.
    ///
    /// Bounds below 1 are treated as 1, which yields integers only.
    #[must_use]
    pub fn with_max_denominator(max_denominator: i64) -> Self {
        Self {
            max_denominator: max_denominator.max(1),
        }
    }
}

impl ExactFraction {
    /// Converts a float using the default [`ApproximationConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`FractionError::NonFinite`] for NaN or infinities and
    /// [`FractionError::OutOfRange`] when `|value| >= 2^63`.
    pub fn from_f64(value: f64) -> Result<Self, FractionError> {
        Self::from_f64_with(value, &ApproximationConfig::default())
    }

    /// Converts a float to the closest fraction whose denominator does not
    /// exceed `config.max_denominator`.
    ///
    /// # Errors
    ///
    /// Returns [`FractionError::NonFinite`] for NaN or infinities and
    /// [`FractionError::OutOfRange`] when `|value| >= 2^63`.
    #[allow(
        clippy::float_cmp,
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss
    )]
    pub fn from_f64_with(value: f64, config: &ApproximationConfig) -> Result<Self, FractionError> {
        if !value.is_finite() {
            return Err(FractionError::NonFinite(value));
        }
        let target = value.abs();
        if target >= I64_LIMIT {
            return Err(FractionError::OutOfRange(value));
        }

        let max_denominator = i128::from(config.max_denominator.max(1));
        let max_numerator = i128::from(i64::MAX);

        // h/k are the two latest convergents, seeded with 1/0 and 0/1.
        let (mut h_prev2, mut h_prev1) = (0_i128, 1_i128);
        let (mut k_prev2, mut k_prev1) = (1_i128, 0_i128);
        let mut x = target;

        for _ in 0..MAX_TERMS {
            let a = x.floor();
            let term = a as i128;
            let Some(h) = term.checked_mul(h_prev1).and_then(|v| v.checked_add(h_prev2)) else {
                break;
            };
            let Some(k) = term.checked_mul(k_prev1).and_then(|v| v.checked_add(k_prev2)) else {
                break;
            };
            if k > max_denominator || h > max_numerator {
                break;
            }

            (h_prev2, h_prev1) = (h_prev1, h);
            (k_prev2, k_prev1) = (k_prev1, k);

            let frac = x - a;
            if frac == 0.0 || h as f64 / k as f64 == target {
                break;
            }
            x = frac.recip();
        }

        // The first term is below 2^63 with denominator 1, so at least one
        // convergent was accepted.
        let numerator = if value < 0.0 { -h_prev1 } else { h_prev1 };
        Ok(Self::new(numerator as i64, k_prev1 as i64))
    }
}

impl TryFrom<f64> for ExactFraction {
    type Error = FractionError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_f64(value)
    }
}
