//! # exactla-fraction
//!
//! Exact rational arithmetic over native integers for the exactla matrix
//! engine.
//!
//! This crate provides:
//! - [`ExactFraction`], always in lowest terms with a positive denominator
//! - Bounded-denominator conversion from `f64` ([`ApproximationConfig`])
//! - Parsing of `n`, `n/d` and terminating decimal literals
//!
//! ## Range
//!
//! Numerators and denominators are `i64`. Intermediate products are formed
//! in `i128` and reduced before narrowing, so only results whose lowest-terms
//! form exceeds `i64` panic.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod approximation;
pub mod error;
pub mod fraction;

#[cfg(test)]
mod proptests;

pub use approximation::ApproximationConfig;
pub use error::FractionError;
pub use fraction::ExactFraction;
