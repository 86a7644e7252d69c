//! Elementary matrices: a single invertible row operation.
//!
//! An n×n matrix is elementary when it differs from the identity by exactly
//! one of: two swapped rows, one diagonal entry scaled to a nonzero value, or
//! one nonzero off-diagonal entry. Left-multiplying by it applies that row
//! operation.

use exactla_fraction::ExactFraction;
use num_traits::{One, Zero};

use crate::dense_matrix::DenseMatrix;
use crate::error::{MatrixError, Result};

/// The row operation an elementary matrix performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementaryKind {
    /// No-op.
    Identity,
    /// Exchange two rows.
    Swap {
        /// Lower row index.
        first: usize,
        /// Higher row index.
        second: usize,
    },
    /// Multiply one row by a nonzero factor.
    Scale {
        /// Row being scaled.
        row: usize,
        /// Nonzero factor.
        factor: ExactFraction,
    },
    /// Add `factor` times row `source` to row `target`.
    AddMultiple {
        /// Row receiving the multiple.
        target: usize,
        /// Row being added.
        source: usize,
        /// Nonzero multiplier.
        factor: ExactFraction,
    },
}

impl ElementaryKind {
    /// Classifies a matrix, returning `None` if it is not elementary.
    #[must_use]
    pub fn classify(matrix: &DenseMatrix) -> Option<Self> {
        if !matrix.is_square() {
            return None;
        }

        // A swap has four deviations; more disqualifies.
        let mut deviations = Vec::with_capacity(4);
        for i in 0..matrix.num_rows() {
            for j in 0..matrix.num_cols() {
                let value = matrix[(i, j)];
                let expected = if i == j {
                    ExactFraction::ONE
                } else {
                    ExactFraction::ZERO
                };
                if value != expected {
                    if deviations.len() == 4 {
                        return None;
                    }
                    deviations.push((i, j, value));
                }
            }
        }

        match *deviations.as_slice() {
            [] => Some(Self::Identity),
            [(row, col, factor)] if row == col => {
                (!factor.is_zero()).then_some(Self::Scale { row, factor })
            }
            [(target, source, factor)] => Some(Self::AddMultiple {
                target,
                source,
                factor,
            }),
            [(i0, i1, a), (i2, j0, b), (j1, i3, c), (j2, j3, d)] => {
                let rows_match = i0 == i1 && i1 == i2 && i2 == i3;
                let cols_match = j0 == j1 && j1 == j2 && j2 == j3;
                (rows_match && cols_match && a.is_zero() && d.is_zero() && b.is_one() && c.is_one())
                    .then_some(Self::Swap {
                        first: i0,
                        second: j0,
                    })
            }
            _ => None,
        }
    }

    /// Determinant of the corresponding matrix.
    #[must_use]
    pub fn determinant(&self) -> ExactFraction {
        match *self {
            Self::Swap { .. } => -ExactFraction::ONE,
            Self::Scale { factor, .. } => factor,
            Self::Identity | Self::AddMultiple { .. } => ExactFraction::ONE,
        }
    }

    /// The operation that undoes this one.
    #[must_use]
    pub fn inverse(&self) -> Self {
        match *self {
            Self::Identity | Self::Swap { .. } => *self,
            Self::Scale { row, factor } => Self::Scale {
                row,
                factor: factor.recip(),
            },
            Self::AddMultiple {
                target,
                source,
                factor,
            } => Self::AddMultiple {
                target,
                source,
                factor: -factor,
            },
        }
    }
}

/// A validated elementary matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementaryOperation {
    matrix: DenseMatrix,
    kind: ElementaryKind,
}

impl ElementaryOperation {
    /// Wraps a matrix after checking that it is elementary.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidElementaryMatrix`] otherwise.
    pub fn new(matrix: DenseMatrix) -> Result<Self> {
        let kind = ElementaryKind::classify(&matrix).ok_or(MatrixError::InvalidElementaryMatrix)?;
        Ok(Self { matrix, kind })
    }

    /// Builds the n×n matrix for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidElementaryMatrix`] when an index is out
    /// of range, a scale factor is zero or an add names the same row twice.
    pub fn from_kind(n: usize, kind: ElementaryKind) -> Result<Self> {
        let mut matrix = DenseMatrix::identity(n);
        match kind {
            ElementaryKind::Identity => {}
            ElementaryKind::Swap { first, second } => {
                if first >= n || second >= n {
                    return Err(MatrixError::InvalidElementaryMatrix);
                }
                matrix.swap_rows(first, second);
            }
            ElementaryKind::Scale { row, factor } => {
                if row >= n || factor.is_zero() {
                    return Err(MatrixError::InvalidElementaryMatrix);
                }
                matrix.set(row, row, factor);
            }
            ElementaryKind::AddMultiple {
                target,
                source,
                factor,
            } => {
                if target >= n || source >= n || target == source {
                    return Err(MatrixError::InvalidElementaryMatrix);
                }
                matrix.set(target, source, factor);
            }
        }
        // Degenerate inputs (swap of a row with itself, unit scale, zero
        // multiple) classify as the identity.
        Self::new(matrix)
    }

    /// n×n matrix exchanging rows `first` and `second`.
    ///
    /// # Errors
    ///
    /// See [`ElementaryOperation::from_kind`].
    pub fn swap(n: usize, first: usize, second: usize) -> Result<Self> {
        let (first, second) = (first.min(second), first.max(second));
        Self::from_kind(n, ElementaryKind::Swap { first, second })
    }

    /// n×n matrix scaling `row` by `factor`.
    ///
    /// # Errors
    ///
    /// See [`ElementaryOperation::from_kind`].
    pub fn scale(n: usize, row: usize, factor: ExactFraction) -> Result<Self> {
        Self::from_kind(n, ElementaryKind::Scale { row, factor })
    }

    /// n×n matrix adding `factor` times row `source` to row `target`.
    ///
    /// # Errors
    ///
    /// See [`ElementaryOperation::from_kind`].
    pub fn add_multiple(n: usize, target: usize, source: usize, factor: ExactFraction) -> Result<Self> {
        Self::from_kind(
            n,
            ElementaryKind::AddMultiple {
                target,
                source,
                factor,
            },
        )
    }

    /// The row operation this matrix performs.
    #[must_use]
    pub fn kind(&self) -> ElementaryKind {
        self.kind
    }

    /// Side length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.matrix.num_rows()
    }

    /// The underlying matrix.
    #[must_use]
    pub fn matrix(&self) -> &DenseMatrix {
        &self.matrix
    }

    /// Unwraps the underlying matrix.
    #[must_use]
    pub fn into_matrix(self) -> DenseMatrix {
        self.matrix
    }

    /// Replaces this operation with its inverse in place.
    pub fn invert(&mut self) -> &mut Self {
        let inverse = self.kind.inverse();
        match inverse {
            ElementaryKind::Identity | ElementaryKind::Swap { .. } => {}
            ElementaryKind::Scale { row, factor } => self.matrix.set(row, row, factor),
            ElementaryKind::AddMultiple {
                target,
                source,
                factor,
            } => self.matrix.set(target, source, factor),
        }
        self.kind = inverse;
        self
    }

    /// Determinant: -1 for a swap, the factor for a scale, 1 otherwise.
    #[must_use]
    pub fn determinant(&self) -> ExactFraction {
        self.kind.determinant()
    }
}

impl AsRef<DenseMatrix> for ElementaryOperation {
    fn as_ref(&self) -> &DenseMatrix {
        &self.matrix
    }
}

impl TryFrom<DenseMatrix> for ElementaryOperation {
    type Error = MatrixError;

    fn try_from(matrix: DenseMatrix) -> Result<Self> {
        Self::new(matrix)
    }
}

impl DenseMatrix {
    /// Checks if the matrix is an elementary matrix.
    #[must_use]
    pub fn is_elementary(&self) -> bool {
        ElementaryKind::classify(self).is_some()
    }
}
