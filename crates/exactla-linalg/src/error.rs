//! Error types for exactla-linalg.

use std::fmt;

use exactla_fraction::FractionError;
use thiserror::Error;

/// Result type alias for matrix operations.
pub type Result<T> = std::result::Result<T, MatrixError>;

/// Row and column counts of a matrix, used in error reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shape {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Errors that can occur in matrix operations.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum MatrixError {
    /// A grid row has a different length than the first row.
    #[error("row {row} has {found} entries, expected {expected}")]
    RaggedRows {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },

    /// Two operands have incompatible dimensions.
    #[error("cannot {operation} a {left} matrix with a {right} matrix")]
    ShapeMismatch {
        /// Name of the operation that complained.
        operation: &'static str,
        /// Shape of the left operand.
        left: Shape,
        /// Shape of the right operand.
        right: Shape,
    },

    /// An augmentation boundary outside the column range.
    #[error("augmentation boundary {boundary} is outside 0..{num_cols}")]
    BoundaryOutOfRange {
        /// Requested boundary column.
        boundary: usize,
        /// Column count of the matrix.
        num_cols: usize,
    },

    /// Inclusive block bounds that are empty or exceed the matrix.
    #[error("block rows {first_row}..={last_row}, cols {first_col}..={last_col} do not fit a {shape} matrix")]
    BlockOutOfRange {
        /// First row of the block.
        first_row: usize,
        /// Last row of the block.
        last_row: usize,
        /// First column of the block.
        first_col: usize,
        /// Last column of the block.
        last_col: usize,
        /// Shape of the source matrix.
        shape: Shape,
    },

    /// The operation is only defined for square matrices.
    #[error("{operation} requires a square matrix, got {shape}")]
    NotSquare {
        /// Name of the operation that complained.
        operation: &'static str,
        /// Shape of the offending matrix.
        shape: Shape,
    },

    /// The matrix does not have full rank.
    #[error("{operation} requires full rank, got rank {rank} for size {size}")]
    Singular {
        /// Name of the operation that complained.
        operation: &'static str,
        /// Rank of the matrix.
        rank: usize,
        /// Row count of the matrix.
        size: usize,
    },

    /// An augmented system without a unique solution for a single right-hand side.
    #[error(
        "system has no unique solution: {equations} equations, {unknowns} unknowns, \
         {rhs_columns} right-hand side columns, coefficient rank {rank}"
    )]
    InconsistentOrUnderdetermined {
        /// Number of rows.
        equations: usize,
        /// Number of coefficient columns.
        unknowns: usize,
        /// Number of augmented columns.
        rhs_columns: usize,
        /// Rank of the coefficient block.
        rank: usize,
    },

    /// The grid is not one constrained deviation away from the identity.
    #[error("matrix is not an elementary matrix")]
    InvalidElementaryMatrix,

    /// An entry could not be converted to an exact fraction.
    #[error(transparent)]
    Fraction(#[from] FractionError),
}
