//! Gaussian elimination to row echelon and reduced row echelon form.
//!
//! Elimination is recursive: find the first nonzero column, pick a pivot in
//! it, cancel every entry below the pivot, then recurse into the region below
//! and to the right of the pivot. The reduced form rotates a row echelon
//! matrix by a half turn, runs a second pass that never swaps rows,
//! rotates back, scales every pivot to one and clears the entries above each
//! pivot.
//!
//! All row operations are applied to whole rows, so a recorded sequence of
//! steps reproduces the result when applied to the input as elementary
//! matrices. [`crate::lu`] relies on this.

use exactla_fraction::ExactFraction;
use num_traits::{One, Zero};
use tracing::{debug, trace};

use crate::dense_matrix::DenseMatrix;
use crate::elementary::ElementaryKind;

/// Pivot policy for one elimination pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EliminationMode {
    /// Swap the first row with a nonzero entry in the pivot column up to the
    /// top of the active region.
    RowEchelon,
    /// Never swap; the pivot is the first row with a nonzero entry in the
    /// pivot column and rows keep their relative order.
    Reduced,
}

impl DenseMatrix {
    /// Reduces the matrix to row echelon form in place.
    pub fn to_row_echelon(&mut self) -> &mut Self {
        debug!(rows = self.num_rows(), cols = self.num_cols(), "reducing to row echelon form");
        self.invalidate();
        eliminate(self, EliminationMode::RowEchelon, 0, None);
        self
    }

    /// Reduces the matrix to row echelon form and returns the row steps that
    /// were applied, in order, with indices relative to the whole matrix.
    pub(crate) fn to_row_echelon_recording(&mut self) -> Vec<ElementaryKind> {
        let mut steps = Vec::new();
        self.invalidate();
        eliminate(self, EliminationMode::RowEchelon, 0, Some(&mut steps));
        steps
    }

    /// Reduces the matrix to reduced row echelon form in place.
    ///
    /// The result is unique: every pivot is one and is the only nonzero
    /// entry in its column.
    pub fn to_reduced_row_echelon(&mut self) -> &mut Self {
        debug!(
            rows = self.num_rows(),
            cols = self.num_cols(),
            "reducing to reduced row echelon form"
        );
        self.invalidate();
        if !self.is_row_echelon() {
            eliminate(self, EliminationMode::RowEchelon, 0, None);
        }

        self.rotate_half_turn();
        trace!(matrix = %self, "rotated for the upward pass");
        eliminate(self, EliminationMode::Reduced, 0, None);
        self.rotate_half_turn();
        trace!(matrix = %self, "rotated back");

        for row in 0..self.num_rows() {
            let Some(pivot_col) = self.pivot_column(row) else {
                break;
            };
            let pivot = self[(row, pivot_col)];
            if !pivot.is_one() {
                let factor = pivot.recip();
                trace!(row, factor = %factor, "scaling pivot to one");
                for col in pivot_col..self.num_cols() {
                    let entry = self.entry_mut(row, col);
                    *entry = *entry * factor;
                }
            }
        }

        for row in 0..self.num_rows() {
            let Some(pivot_col) = self.pivot_column(row) else {
                break;
            };
            for above in 0..row {
                let coefficient = self[(above, pivot_col)];
                if !coefficient.is_zero() {
                    trace!(row = above, pivot_row = row, coefficient = %coefficient, "clearing above pivot");
                    subtract_row_multiple(self, above, row, coefficient, pivot_col);
                }
            }
        }
        self
    }

    /// Checks for row echelon form: zero rows sit at the bottom and every
    /// pivot lies strictly to the right of the pivot in the row above.
    #[must_use]
    pub fn is_row_echelon(&self) -> bool {
        let mut previous: Option<usize> = None;
        let mut seen_zero_row = false;
        for row in 0..self.num_rows() {
            match self.pivot_column(row) {
                None => seen_zero_row = true,
                Some(col) => {
                    if seen_zero_row || previous.is_some_and(|p| col <= p) {
                        return false;
                    }
                    previous = Some(col);
                }
            }
        }
        true
    }

    /// Checks for reduced row echelon form: row echelon form where every
    /// pivot is one and the only nonzero entry in its column.
    #[must_use]
    pub fn is_reduced_row_echelon(&self) -> bool {
        self.is_row_echelon()
            && (0..self.num_rows()).all(|row| match self.pivot_column(row) {
                None => true,
                Some(col) => {
                    self[(row, col)].is_one()
                        && (0..self.num_rows()).all(|other| other == row || self[(other, col)].is_zero())
                }
            })
    }

    /// Number of nonzero rows in row echelon form. The receiver is untouched.
    #[must_use]
    pub fn rank(&self) -> usize {
        let mut copy = self.block(0, self.num_rows(), 0, self.num_cols());
        copy.to_row_echelon();
        copy.nonzero_row_count()
    }

    /// Column count minus rank.
    #[must_use]
    pub fn nullity(&self) -> usize {
        self.num_cols() - self.rank()
    }

    /// Counts rows with a nonzero entry. Only meaningful in echelon form,
    /// where zero rows trail.
    pub(crate) fn nonzero_row_count(&self) -> usize {
        (0..self.num_rows()).filter(|&row| !self.is_zero_row(row)).count()
    }
}

/// One level of the recursive elimination. `row_offset` maps local row
/// indices of `m` to rows of the outermost matrix for recorded steps.
fn eliminate(
    m: &mut DenseMatrix,
    mode: EliminationMode,
    row_offset: usize,
    mut steps: Option<&mut Vec<ElementaryKind>>,
) {
    if m.num_rows() == 0 || m.num_cols() == 0 || m.is_zero() || m.is_row_echelon() {
        return;
    }
    let Some(col) = (0..m.num_cols()).find(|&c| !m.is_zero_column(c)) else {
        return;
    };
    let Some(first_nonzero) = (0..m.num_rows()).find(|&r| !m[(r, col)].is_zero()) else {
        return;
    };

    let pivot_row = match mode {
        EliminationMode::RowEchelon => {
            if first_nonzero != 0 {
                trace!(
                    first = row_offset,
                    second = row_offset + first_nonzero,
                    "swapping rows"
                );
                m.swap_rows(0, first_nonzero);
                if let Some(steps) = steps.as_deref_mut() {
                    steps.push(ElementaryKind::Swap {
                        first: row_offset,
                        second: row_offset + first_nonzero,
                    });
                }
            }
            0
        }
        EliminationMode::Reduced => first_nonzero,
    };

    let pivot = m[(pivot_row, col)];
    for row in pivot_row + 1..m.num_rows() {
        let entry = m[(row, col)];
        if entry.is_zero() {
            continue;
        }
        let coefficient = entry / pivot;
        trace!(
            row = row_offset + row,
            pivot_row = row_offset + pivot_row,
            coefficient = %coefficient,
            "cancelling entry below pivot"
        );
        subtract_row_multiple(m, row, pivot_row, coefficient, col);
        if let Some(steps) = steps.as_deref_mut() {
            steps.push(ElementaryKind::AddMultiple {
                target: row_offset + row,
                source: row_offset + pivot_row,
                factor: -coefficient,
            });
        }
    }

    let region_rows = m.num_rows() - pivot_row - 1;
    let region_cols = m.num_cols() - col - 1;
    if region_rows > 0 && region_cols > 0 {
        let mut region = m.block(pivot_row + 1, region_rows, col + 1, region_cols);
        trace!(region = %region, "recursing into trailing region");
        eliminate(&mut region, mode, row_offset + pivot_row + 1, steps);
        m.insert_block(pivot_row + 1, col + 1, &region);
    }
}

/// `row[target] -= coefficient * row[source]` for columns `from_col..`.
/// Callers guarantee the source row is zero left of `from_col`.
fn subtract_row_multiple(
    m: &mut DenseMatrix,
    target: usize,
    source: usize,
    coefficient: ExactFraction,
    from_col: usize,
) {
    for col in from_col..m.num_cols() {
        let delta = m[(source, col)] * coefficient;
        let entry = m.entry_mut(target, col);
        *entry = *entry - delta;
    }
}
