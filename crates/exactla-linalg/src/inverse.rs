//! Matrix inverse by Gauss-Jordan elimination on [A | I].

use num_traits::Zero;
use tracing::debug;

use crate::dense_matrix::DenseMatrix;
use crate::error::{MatrixError, Result};

impl DenseMatrix {
    /// Returns the inverse, computed once and cached.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::NotSquare`] for non-square input and
    /// [`MatrixError::Singular`] when the determinant is zero.
    pub fn inverse(&self) -> Result<&DenseMatrix> {
        if let Some(inverse) = self.memo.inverse.get() {
            return Ok(&**inverse);
        }
        if !self.is_square() {
            return Err(MatrixError::NotSquare {
                operation: "inverse",
                shape: self.shape(),
            });
        }
        let n = self.num_rows();
        if self.determinant()?.is_zero() {
            return Err(MatrixError::Singular {
                operation: "inverse",
                rank: self.rank(),
                size: n,
            });
        }
        debug!(size = n, "inverting");

        let mut augmented = self.concat_columns(&DenseMatrix::identity(n))?;
        augmented.to_reduced_row_echelon();
        let inverse = augmented.block(0, n, n, n);

        let inverse: &DenseMatrix = self.memo.inverse.get_or_init(|| Box::new(inverse));
        Ok(inverse)
    }
}
