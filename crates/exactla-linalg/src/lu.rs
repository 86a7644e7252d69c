//! LU decomposition by recorded elimination.
//!
//! Row echelon reduction of a square full-rank matrix A applies elementary
//! operations E_1, ..., E_k so that U = E_k ... E_1 A is upper triangular.
//! Then A = E_1^-1 ... E_k^-1 U, so L is the product of the inverted
//! operations in recording order. L is unit lower triangular when no row swap
//! was needed; otherwise it also carries the permutation.

use exactla_fraction::ExactFraction;
use num_traits::Zero;
use tracing::{debug, trace};

use crate::dense_matrix::DenseMatrix;
use crate::elementary::ElementaryOperation;
use crate::error::{MatrixError, Result};

/// Factors L and U with L * U equal to the decomposed matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LuDecomposition {
    lower: DenseMatrix,
    upper: DenseMatrix,
    operations: Vec<ElementaryOperation>,
}

impl LuDecomposition {
    /// Decomposes a square matrix of full rank.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::NotSquare`] or [`MatrixError::Singular`].
    pub fn new(matrix: &DenseMatrix) -> Result<Self> {
        if !matrix.is_square() {
            return Err(MatrixError::NotSquare {
                operation: "LU decomposition",
                shape: matrix.shape(),
            });
        }
        let n = matrix.num_rows();
        debug!(size = n, "computing LU decomposition");

        let mut upper = matrix.clone();
        let steps = upper.to_row_echelon_recording();
        let rank = upper.nonzero_row_count();
        if rank < n {
            return Err(MatrixError::Singular {
                operation: "LU decomposition",
                rank,
                size: n,
            });
        }

        let operations = steps
            .into_iter()
            .map(|kind| ElementaryOperation::from_kind(n, kind))
            .collect::<Result<Vec<_>>>()?;

        let mut lower = DenseMatrix::identity(n);
        for operation in &operations {
            let mut inverse = operation.clone();
            inverse.invert();
            trace!(step = ?inverse.kind(), "multiplying inverted step into L");
            lower = lower.multiply(&inverse)?;
        }

        Ok(Self {
            lower,
            upper,
            operations,
        })
    }

    /// The lower factor.
    #[must_use]
    pub fn lower(&self) -> &DenseMatrix {
        &self.lower
    }

    /// The upper triangular factor.
    #[must_use]
    pub fn upper(&self) -> &DenseMatrix {
        &self.upper
    }

    /// Elementary operations applied during elimination, in order.
    #[must_use]
    pub fn operations(&self) -> &[ElementaryOperation] {
        &self.operations
    }

    /// Determinant of L: the product of the inverted operations'
    /// determinants.
    #[must_use]
    pub fn lower_determinant(&self) -> ExactFraction {
        self.operations
            .iter()
            .map(|op| op.determinant().recip())
            .product()
    }

    /// Determinant of U: the product of its diagonal.
    #[must_use]
    pub fn upper_determinant(&self) -> ExactFraction {
        self.upper.diagonal_product()
    }

    /// Determinant of the decomposed matrix.
    #[must_use]
    pub fn determinant(&self) -> ExactFraction {
        self.lower_determinant() * self.upper_determinant()
    }
}

impl DenseMatrix {
    /// Returns the LU decomposition, computed once and cached.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::NotSquare`] or [`MatrixError::Singular`].
    pub fn lu_decompose(&self) -> Result<&LuDecomposition> {
        if let Some(lu) = self.memo.lu.get() {
            return Ok(&**lu);
        }
        let lu = LuDecomposition::new(self)?;
        let lu: &LuDecomposition = self.memo.lu.get_or_init(|| Box::new(lu));
        Ok(lu)
    }

    /// Computes the determinant.
    ///
    /// Rank-deficient matrices short-circuit to zero and triangular matrices
    /// to their diagonal product; everything else goes through
    /// [`DenseMatrix::lu_decompose`].
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::NotSquare`] for non-square input.
    pub fn determinant(&self) -> Result<ExactFraction> {
        if !self.is_square() {
            return Err(MatrixError::NotSquare {
                operation: "determinant",
                shape: self.shape(),
            });
        }
        debug!(size = self.num_rows(), "computing determinant");
        if self.rank() < self.num_rows() {
            return Ok(ExactFraction::zero());
        }
        if self.is_upper_triangular() || self.is_lower_triangular() {
            return Ok(self.diagonal_product());
        }
        Ok(self.lu_decompose()?.determinant())
    }

    /// Checks for a nonzero determinant.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::NotSquare`] for non-square input.
    pub fn is_invertible(&self) -> Result<bool> {
        Ok(!self.determinant()?.is_zero())
    }
}
