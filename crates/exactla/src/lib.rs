//! # exactla
//!
//! Exact matrix algebra over rational numbers.
//!
//! Every entry is an [`ExactFraction`](fraction::ExactFraction) kept in
//! lowest terms, so elimination, determinants, inverses and solutions carry
//! no rounding error.
//!
//! ## Features
//!
//! - **Echelon forms**: recursive Gaussian elimination to row echelon and
//!   unique reduced row echelon form, rank and nullity
//! - **Factorization**: LU decomposition from recorded elementary operations
//! - **Determinant and inverse**: with triangular and rank shortcuts, cached
//!   per matrix
//! - **Linear systems**: augmented matrices with a unique-solution solver
//! - **Float input**: bounded-denominator conversion, `0.1` becomes `1/10`
//!
//! ## Quick Start
//!
//! ```rust
//! use exactla::prelude::*;
//!
//! let a = DenseMatrix::from_i64_rows(&[[1, 1, -2], [1, 3, -1], [2, 1, -5]])?;
//! let b = DenseMatrix::from_i64_rows(&[[4], [7], [7]])?;
//!
//! let x = AugmentedSystem::from_parts(&a, &b)?.solve()?;
//! assert_eq!(a.multiply(&x)?, b);
//! assert_eq!(a.determinant()?, ExactFraction::from_integer(-1));
//! # Ok::<(), MatrixError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use exactla_fraction as fraction;
pub use exactla_linalg as linalg;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use exactla_fraction::{ApproximationConfig, ExactFraction, FractionError};
    pub use exactla_linalg::{
        AugmentedSystem, DenseMatrix, ElementaryKind, ElementaryOperation, LuDecomposition,
        MatrixError, Shape,
    };
}
