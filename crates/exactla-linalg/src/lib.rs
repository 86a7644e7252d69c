//! # exactla-linalg
//!
//! Dense linear algebra over exact fractions.
//!
//! This crate provides:
//! - [`DenseMatrix`], a row-major matrix of [`ExactFraction`]
//! - Recursive Gaussian elimination to row echelon and reduced row echelon
//!   form, rank and nullity
//! - Elementary matrices ([`ElementaryOperation`]) with classification and
//!   inversion
//! - LU decomposition by recorded elimination, determinant and inverse
//! - Augmented systems ([`AugmentedSystem`]) with a unique-solution solver
//!
//! ## Caching
//!
//! The LU factors, the inverse and the transpose are computed at most once
//! per matrix content. Every method that writes entries drops the cache.
//!
//! ## Diagnostics
//!
//! Operations emit `tracing` events: `debug` on entry with the matrix shape,
//! `trace` for each pivot, row swap and cancellation coefficient.
//!
//! [`ExactFraction`]: exactla_fraction::ExactFraction

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod augmented;
pub mod dense_matrix;
pub mod echelon;
pub mod elementary;
pub mod error;
pub mod lu;

mod inverse;

pub use augmented::AugmentedSystem;
pub use dense_matrix::DenseMatrix;
pub use elementary::{ElementaryKind, ElementaryOperation};
pub use error::{MatrixError, Result, Shape};
pub use lu::LuDecomposition;

#[cfg(test)]
mod proptests;
