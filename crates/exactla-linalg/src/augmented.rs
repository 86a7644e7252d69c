//! Augmented systems `[coefficients | right-hand side]`.

use tracing::debug;

use crate::dense_matrix::DenseMatrix;
use crate::error::{MatrixError, Result};

/// A matrix whose columns from `boundary` onward form the right-hand side.
///
/// A system without a boundary behaves like a plain coefficient matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AugmentedSystem {
    matrix: DenseMatrix,
    boundary: Option<usize>,
}

impl AugmentedSystem {
    /// Declares columns `boundary..` of `matrix` as the right-hand side.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::BoundaryOutOfRange`] unless
    /// `boundary < matrix.num_cols()`.
    pub fn new(matrix: DenseMatrix, boundary: usize) -> Result<Self> {
        if boundary >= matrix.num_cols() {
            return Err(MatrixError::BoundaryOutOfRange {
                boundary,
                num_cols: matrix.num_cols(),
            });
        }
        Ok(Self {
            matrix,
            boundary: Some(boundary),
        })
    }

    /// Wraps a matrix with no augmentation.
    #[must_use]
    pub fn unaugmented(matrix: DenseMatrix) -> Self {
        Self {
            matrix,
            boundary: None,
        }
    }

    /// Joins coefficients and right-hand side column-wise.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::ShapeMismatch`] if the row counts differ and
    /// [`MatrixError::BoundaryOutOfRange`] if `rhs` has no columns.
    pub fn from_parts(coefficients: &DenseMatrix, rhs: &DenseMatrix) -> Result<Self> {
        let matrix = coefficients.concat_columns(rhs)?;
        Self::new(matrix, coefficients.num_cols())
    }

    /// First right-hand side column, if any.
    #[must_use]
    pub fn boundary(&self) -> Option<usize> {
        self.boundary
    }

    /// The whole matrix.
    #[must_use]
    pub fn matrix(&self) -> &DenseMatrix {
        &self.matrix
    }

    /// Unwraps the whole matrix.
    #[must_use]
    pub fn into_matrix(self) -> DenseMatrix {
        self.matrix
    }

    /// Number of coefficient columns. A boundary of zero leaves no
    /// coefficient block, so the whole matrix stands in for it.
    fn coefficient_cols(&self) -> usize {
        match self.boundary {
            Some(boundary) if boundary > 0 => boundary,
            _ => self.matrix.num_cols(),
        }
    }

    /// Copy of the columns left of the boundary.
    #[must_use]
    pub fn coefficients(&self) -> DenseMatrix {
        let cols = self.boundary.unwrap_or(self.matrix.num_cols());
        self.matrix.block(0, self.matrix.num_rows(), 0, cols)
    }

    /// Copy of the right-hand side columns.
    #[must_use]
    pub fn augmented_part(&self) -> Option<DenseMatrix> {
        self.boundary.map(|boundary| {
            self.matrix.block(
                0,
                self.matrix.num_rows(),
                boundary,
                self.matrix.num_cols() - boundary,
            )
        })
    }

    /// Checks if the coefficient block is square.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.coefficient_cols() == self.matrix.num_rows()
    }

    /// Rank of the coefficient block.
    #[must_use]
    pub fn rank(&self) -> usize {
        self.matrix
            .block(0, self.matrix.num_rows(), 0, self.coefficient_cols())
            .rank()
    }

    /// Coefficient columns minus rank.
    #[must_use]
    pub fn nullity(&self) -> usize {
        self.coefficient_cols() - self.rank()
    }

    /// Checks that appending the right-hand side does not raise the rank,
    /// i.e. that at least one solution exists.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.rank() == self.matrix.rank()
    }

    /// Copies the inclusive block `first_row..=last_row`,
    /// `first_col..=last_col`. The boundary moves with the block, or is
    /// dropped when it falls outside the copied columns.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::BlockOutOfRange`] for invalid bounds.
    pub fn sub_system(
        &self,
        first_row: usize,
        last_row: usize,
        first_col: usize,
        last_col: usize,
    ) -> Result<Self> {
        let matrix = self.matrix.sub_matrix(first_row, last_row, first_col, last_col)?;
        let boundary = self
            .boundary
            .filter(|&b| (first_col..=last_col).contains(&b))
            .map(|b| b - first_col);
        Ok(Self { matrix, boundary })
    }

    /// Reduces the whole system to row echelon form in place.
    pub fn to_row_echelon(&mut self) -> &mut Self {
        self.matrix.to_row_echelon();
        self
    }

    /// Reduces the whole system to reduced row echelon form in place.
    pub fn to_reduced_row_echelon(&mut self) -> &mut Self {
        self.matrix.to_reduced_row_echelon();
        self
    }

    /// Solves a square system with a single right-hand side column,
    /// returning the unique solution as a column vector. The receiver is
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InconsistentOrUnderdetermined`] unless there
    /// is exactly one right-hand side column and the coefficient block is
    /// square with full rank.
    pub fn solve(&self) -> Result<DenseMatrix> {
        let rows = self.matrix.num_rows();
        let cols = self.matrix.num_cols();
        let rank = self.rank();
        let rhs_columns = self.boundary.map_or(0, |b| cols - b);
        debug!(rows, cols, boundary = ?self.boundary, rank, "solving augmented system");

        let Some(boundary) = self.boundary else {
            return Err(self.unsolvable(rhs_columns, rank));
        };
        if rhs_columns != 1 || boundary != rows || rank != rows {
            return Err(self.unsolvable(rhs_columns, rank));
        }

        let mut reduced = self.matrix.clone();
        reduced.to_reduced_row_echelon();
        Ok(reduced.block(0, rows, boundary, 1))
    }

    fn unsolvable(&self, rhs_columns: usize, rank: usize) -> MatrixError {
        MatrixError::InconsistentOrUnderdetermined {
            equations: self.matrix.num_rows(),
            unknowns: self.boundary.unwrap_or(self.matrix.num_cols()),
            rhs_columns,
            rank,
        }
    }
}

impl AsRef<DenseMatrix> for AugmentedSystem {
    fn as_ref(&self) -> &DenseMatrix {
        &self.matrix
    }
}

impl From<AugmentedSystem> for DenseMatrix {
    fn from(system: AugmentedSystem) -> Self {
        system.matrix
    }
}

#[cfg(test)]
mod tests {
    use exactla_fraction::ExactFraction;

    use super::*;

    fn m(rows: &[&[i64]]) -> DenseMatrix {
        DenseMatrix::from_i64_rows(rows).unwrap()
    }

    fn column(values: &[i64]) -> DenseMatrix {
        let rows: Vec<[i64; 1]> = values.iter().map(|&v| [v]).collect();
        DenseMatrix::from_i64_rows(rows.as_slice()).unwrap()
    }

    fn example_system() -> AugmentedSystem {
        AugmentedSystem::new(
            m(&[&[1, 1, -2, 4], &[1, 3, -1, 7], &[2, 1, -5, 7]]),
            3,
        )
        .unwrap()
    }

    #[test]
    fn test_solve() {
        let system = example_system();
        assert!(system.is_square());
        assert!(system.is_consistent());
        assert_eq!(system.rank(), 3);
        assert_eq!(system.nullity(), 0);
        assert_eq!(system.solve().unwrap(), column(&[0, 2, -1]));
        // The receiver keeps its entries.
        assert_eq!(system.matrix()[(0, 3)], ExactFraction::from_integer(4));
    }

    #[test]
    fn test_from_parts() {
        let a = m(&[&[2, 1], &[1, 3]]);
        let b = column(&[3, 5]);
        let system = AugmentedSystem::from_parts(&a, &b).unwrap();
        assert_eq!(system.boundary(), Some(2));
        assert_eq!(system.coefficients(), a);
        assert_eq!(system.augmented_part(), Some(b));
        // 2x + y = 3, x + 3y = 5 => x = 4/5, y = 7/5
        let x = system.solve().unwrap();
        assert_eq!(x[(0, 0)], ExactFraction::new(4, 5));
        assert_eq!(x[(1, 0)], ExactFraction::new(7, 5));

        assert!(matches!(
            AugmentedSystem::from_parts(&a, &column(&[1, 2, 3])),
            Err(MatrixError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            AugmentedSystem::from_parts(&a, &DenseMatrix::zeros(2, 0)),
            Err(MatrixError::BoundaryOutOfRange { .. })
        ));
    }

    #[test]
    fn test_boundary_out_of_range() {
        assert_eq!(
            AugmentedSystem::new(DenseMatrix::zeros(2, 2), 2),
            Err(MatrixError::BoundaryOutOfRange {
                boundary: 2,
                num_cols: 2
            })
        );
    }

    #[test]
    fn test_solve_rejects_two_rhs_columns() {
        let system = AugmentedSystem::new(m(&[&[1, 0, 1, 2], &[0, 1, 3, 4]]), 2).unwrap();
        assert_eq!(
            system.solve(),
            Err(MatrixError::InconsistentOrUnderdetermined {
                equations: 2,
                unknowns: 2,
                rhs_columns: 2,
                rank: 2
            })
        );
    }

    #[test]
    fn test_solve_rejects_singular_coefficients() {
        let system = AugmentedSystem::new(m(&[&[1, 2, 3], &[2, 4, 6]]), 2).unwrap();
        assert_eq!(system.rank(), 1);
        assert_eq!(system.nullity(), 1);
        assert!(system.is_consistent());
        assert!(matches!(
            system.solve(),
            Err(MatrixError::InconsistentOrUnderdetermined { rank: 1, .. })
        ));

        let inconsistent = AugmentedSystem::new(m(&[&[1, 2, 3], &[2, 4, 7]]), 2).unwrap();
        assert!(!inconsistent.is_consistent());
    }

    #[test]
    fn test_solve_rejects_non_square_coefficients() {
        let system = AugmentedSystem::new(m(&[&[1, 0, 0, 1], &[0, 1, 0, 2]]), 3).unwrap();
        assert!(!system.is_square());
        assert!(system.solve().is_err());
        assert!(AugmentedSystem::unaugmented(DenseMatrix::identity(2)).solve().is_err());
    }

    #[test]
    fn test_sub_system_boundary() {
        let system = example_system();
        let inside = system.sub_system(0, 1, 1, 3).unwrap();
        assert_eq!(inside.boundary(), Some(2));
        assert_eq!(inside.matrix(), &m(&[&[1, -2, 4], &[3, -1, 7]]));

        let coefficients_only = system.sub_system(0, 2, 0, 2).unwrap();
        assert_eq!(coefficients_only.boundary(), None);
        assert_eq!(coefficients_only.rank(), 3);

        let rhs_only = system.sub_system(0, 2, 3, 3).unwrap();
        assert_eq!(rhs_only.boundary(), Some(0));

        assert!(matches!(
            system.sub_system(0, 3, 0, 0),
            Err(MatrixError::BlockOutOfRange { .. })
        ));
    }

    #[test]
    fn test_rank_with_zero_boundary_uses_whole_matrix() {
        let system = AugmentedSystem::new(m(&[&[1, 2], &[2, 4]]), 0).unwrap();
        assert_eq!(system.rank(), 1);
        assert_eq!(system.nullity(), 1);
    }

    #[test]
    fn test_in_place_reduction() {
        let mut system = example_system();
        system.to_reduced_row_echelon();
        assert_eq!(system.boundary(), Some(3));
        assert_eq!(
            system.matrix(),
            &m(&[&[1, 0, 0, 0], &[0, 1, 0, 2], &[0, 0, 1, -1]])
        );

        let mut system = example_system();
        system.to_row_echelon();
        assert!(system.matrix().is_row_echelon());
    }
}
