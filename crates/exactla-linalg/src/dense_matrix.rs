//! Dense matrix of exact fractions.
//!
//! Entries are stored in row-major order. Elimination lives in
//! [`crate::echelon`]; this module holds construction, access, products,
//! block copies and the structural predicates.

use std::fmt;
use std::ops::Index;
use std::sync::OnceLock;

use exactla_fraction::ExactFraction;
use num_traits::{One, Zero};

use crate::error::{MatrixError, Result, Shape};
use crate::lu::LuDecomposition;

/// Values derived from the entries, each computed at most once.
///
/// Every method that writes entries replaces the memo first, so a populated
/// slot always describes the current content.
#[derive(Clone, Default)]
pub(crate) struct Memo {
    pub(crate) lu: OnceLock<Box<LuDecomposition>>,
    pub(crate) inverse: OnceLock<Box<DenseMatrix>>,
    pub(crate) transpose: OnceLock<Box<DenseMatrix>>,
}

/// Dense matrix of [`ExactFraction`] stored in row-major order.
#[derive(Clone)]
pub struct DenseMatrix {
    /// Matrix entries in row-major order.
    data: Vec<ExactFraction>,
    /// Number of rows.
    num_rows: usize,
    /// Number of columns.
    num_cols: usize,
    pub(crate) memo: Memo,
}

impl DenseMatrix {
    /// Creates a new matrix filled with zeros.
    #[must_use]
    pub fn zeros(num_rows: usize, num_cols: usize) -> Self {
        Self::from_row_major(num_rows, num_cols, vec![ExactFraction::zero(); num_rows * num_cols])
    }

    /// Creates an identity matrix.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            *m.entry_mut(i, i) = ExactFraction::one();
        }
        m
    }

    fn from_row_major(num_rows: usize, num_cols: usize, data: Vec<ExactFraction>) -> Self {
        debug_assert_eq!(data.len(), num_rows * num_cols);
        Self {
            data,
            num_rows,
            num_cols,
            memo: Memo::default(),
        }
    }

    /// Creates a matrix from a 2D vector.
    ///
    /// An empty outer vector yields the 0x0 matrix.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::RaggedRows`] if the rows differ in length.
    pub fn try_from_rows(rows: Vec<Vec<ExactFraction>>) -> Result<Self> {
        let num_rows = rows.len();
        let num_cols = rows.first().map_or(0, Vec::len);
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != num_cols)
        {
            return Err(MatrixError::RaggedRows {
                row,
                expected: num_cols,
                found,
            });
        }
        let data = rows.into_iter().flatten().collect();
        Ok(Self::from_row_major(num_rows, num_cols, data))
    }

    /// Creates a matrix from a 2D vector.
    ///
    /// # Panics
    ///
    /// Panics if the rows differ in length.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<ExactFraction>>) -> Self {
        match Self::try_from_rows(rows) {
            Ok(m) => m,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates a matrix from rows of integers.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::RaggedRows`] if the rows differ in length.
    pub fn from_i64_rows<R: AsRef<[i64]>>(rows: &[R]) -> Result<Self> {
        Self::try_from_rows(
            rows.iter()
                .map(|row| row.as_ref().iter().map(|&v| ExactFraction::from(v)).collect())
                .collect(),
        )
    }

    /// Creates a matrix from rows of floats, converting each entry with
    /// [`ExactFraction::from_f64`].
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::Fraction`] for entries that cannot be
    /// represented and [`MatrixError::RaggedRows`] if the rows differ in
    /// length.
    pub fn from_f64_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let rows = rows
            .iter()
            .map(|row| {
                row.as_ref()
                    .iter()
                    .map(|&v| ExactFraction::from_f64(v))
                    .collect::<std::result::Result<Vec<_>, _>>()
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Self::try_from_rows(rows)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Returns the row and column counts.
    #[must_use]
    pub fn shape(&self) -> Shape {
        Shape {
            rows: self.num_rows,
            cols: self.num_cols,
        }
    }

    /// Checks if the matrix is square.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.num_rows == self.num_cols
    }

    /// Returns a reference to the entry at (row, col).
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&ExactFraction> {
        if row < self.num_rows && col < self.num_cols {
            Some(&self.data[row * self.num_cols + col])
        } else {
            None
        }
    }

    /// Returns a slice of the specified row.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of range.
    #[must_use]
    pub fn row(&self, row: usize) -> &[ExactFraction] {
        assert!(row < self.num_rows, "row {row} out of range");
        let start = row * self.num_cols;
        &self.data[start..start + self.num_cols]
    }

    /// Returns a column as a vector.
    #[must_use]
    pub fn column(&self, col: usize) -> Vec<ExactFraction> {
        (0..self.num_rows).map(|row| self[(row, col)]).collect()
    }

    /// Overwrites the entry at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if the position is out of range.
    pub fn set(&mut self, row: usize, col: usize, value: ExactFraction) {
        assert!(
            row < self.num_rows && col < self.num_cols,
            "position ({row}, {col}) out of range for a {} matrix",
            self.shape()
        );
        self.invalidate();
        *self.entry_mut(row, col) = value;
    }

    /// Swaps two rows in-place.
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        self.invalidate();
        let i_start = i * self.num_cols;
        let j_start = j * self.num_cols;
        for k in 0..self.num_cols {
            self.data.swap(i_start + k, j_start + k);
        }
    }

    /// Mutable entry access that leaves the memo alone; callers invalidate.
    pub(crate) fn entry_mut(&mut self, row: usize, col: usize) -> &mut ExactFraction {
        &mut self.data[row * self.num_cols + col]
    }

    pub(crate) fn invalidate(&mut self) {
        self.memo = Memo::default();
    }

    /// Rotates the grid by 180 degrees. Row-major storage makes this a
    /// reversal of the entry vector.
    pub(crate) fn rotate_half_turn(&mut self) {
        self.invalidate();
        self.data.reverse();
    }

    /// Matrix-matrix multiply: C = A * B.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::ShapeMismatch`] unless `self.num_cols()`
    /// equals `other.num_rows()`.
    pub fn multiply<M: AsRef<DenseMatrix>>(&self, other: &M) -> Result<Self> {
        let other = other.as_ref();
        if self.num_cols != other.num_rows {
            return Err(MatrixError::ShapeMismatch {
                operation: "multiply",
                left: self.shape(),
                right: other.shape(),
            });
        }

        let mut result = Self::zeros(self.num_rows, other.num_cols);
        for i in 0..self.num_rows {
            for j in 0..other.num_cols {
                *result.entry_mut(i, j) = (0..self.num_cols)
                    .map(|k| self[(i, k)] * other[(k, j)])
                    .sum();
            }
        }
        Ok(result)
    }

    /// Returns the transpose of the matrix, computed once and cached.
    #[must_use]
    pub fn transpose(&self) -> &DenseMatrix {
        self.memo.transpose.get_or_init(|| {
            let mut result = Self::zeros(self.num_cols, self.num_rows);
            for i in 0..self.num_rows {
                for j in 0..self.num_cols {
                    *result.entry_mut(j, i) = self[(i, j)];
                }
            }
            Box::new(result)
        })
    }

    /// Joins `other` to the right of this matrix.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::ShapeMismatch`] if the row counts differ.
    pub fn concat_columns(&self, other: &DenseMatrix) -> Result<Self> {
        if self.num_rows != other.num_rows {
            return Err(MatrixError::ShapeMismatch {
                operation: "join",
                left: self.shape(),
                right: other.shape(),
            });
        }
        let mut data = Vec::with_capacity(self.data.len() + other.data.len());
        for row in 0..self.num_rows {
            data.extend_from_slice(self.row(row));
            data.extend_from_slice(other.row(row));
        }
        Ok(Self::from_row_major(
            self.num_rows,
            self.num_cols + other.num_cols,
            data,
        ))
    }

    /// Returns a copy of the block spanning the inclusive bounds
    /// `first_row..=last_row` and `first_col..=last_col`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::BlockOutOfRange`] if a range is empty or
    /// extends past the matrix.
    pub fn sub_matrix(
        &self,
        first_row: usize,
        last_row: usize,
        first_col: usize,
        last_col: usize,
    ) -> Result<Self> {
        if first_row > last_row
            || last_row >= self.num_rows
            || first_col > last_col
            || last_col >= self.num_cols
        {
            return Err(MatrixError::BlockOutOfRange {
                first_row,
                last_row,
                first_col,
                last_col,
                shape: self.shape(),
            });
        }
        Ok(self.block(
            first_row,
            last_row - first_row + 1,
            first_col,
            last_col - first_col + 1,
        ))
    }

    /// Copies `rows x cols` entries starting at (`first_row`, `first_col`).
    pub(crate) fn block(&self, first_row: usize, rows: usize, first_col: usize, cols: usize) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for row in first_row..first_row + rows {
            let start = row * self.num_cols + first_col;
            data.extend_from_slice(&self.data[start..start + cols]);
        }
        Self::from_row_major(rows, cols, data)
    }

    /// Writes `block` into this matrix with its top-left corner at (row, col).
    pub(crate) fn insert_block(&mut self, row: usize, col: usize, block: &DenseMatrix) {
        for i in 0..block.num_rows {
            let start = (row + i) * self.num_cols + col;
            self.data[start..start + block.num_cols].copy_from_slice(block.row(i));
        }
    }

    /// Returns the column of the first nonzero entry in `row`.
    #[must_use]
    pub fn pivot_column(&self, row: usize) -> Option<usize> {
        self.row(row).iter().position(|v| !v.is_zero())
    }

    /// Checks if a row contains only zero entries.
    #[must_use]
    pub fn is_zero_row(&self, row: usize) -> bool {
        self.row(row).iter().all(Zero::is_zero)
    }

    /// Checks if a column contains only zero entries.
    #[must_use]
    pub fn is_zero_column(&self, col: usize) -> bool {
        (0..self.num_rows).all(|row| self[(row, col)].is_zero())
    }

    /// Checks if every entry is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(Zero::is_zero)
    }

    /// Checks if this is an identity matrix.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.is_square()
            && self.entries().all(|(i, j, v)| {
                if i == j {
                    v.is_one()
                } else {
                    v.is_zero()
                }
            })
    }

    /// Checks if every entry below the main diagonal is zero.
    #[must_use]
    pub fn is_upper_triangular(&self) -> bool {
        self.entries().all(|(i, j, v)| i <= j || v.is_zero())
    }

    /// Checks if every entry above the main diagonal is zero.
    #[must_use]
    pub fn is_lower_triangular(&self) -> bool {
        self.entries().all(|(i, j, v)| i >= j || v.is_zero())
    }

    /// Product of the main diagonal.
    pub(crate) fn diagonal_product(&self) -> ExactFraction {
        (0..self.num_rows.min(self.num_cols))
            .map(|i| self[(i, i)])
            .product()
    }

    /// Iterates over `(row, col, entry)` in row-major order.
    fn entries(&self) -> impl Iterator<Item = (usize, usize, &ExactFraction)> + '_ {
        let cols = self.num_cols.max(1);
        self.data
            .iter()
            .enumerate()
            .map(move |(idx, v)| (idx / cols, idx % cols, v))
    }
}

impl Index<(usize, usize)> for DenseMatrix {
    type Output = ExactFraction;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.data[row * self.num_cols + col]
    }
}

impl AsRef<DenseMatrix> for DenseMatrix {
    fn as_ref(&self) -> &DenseMatrix {
        self
    }
}

impl PartialEq for DenseMatrix {
    fn eq(&self, other: &Self) -> bool {
        self.num_rows == other.num_rows && self.num_cols == other.num_cols && self.data == other.data
    }
}

impl Eq for DenseMatrix {}

impl fmt::Debug for DenseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DenseMatrix")
            .field("num_rows", &self.num_rows)
            .field("num_cols", &self.num_cols)
            .field("data", &format_args!("{self}"))
            .finish_non_exhaustive()
    }
}

/// Compact single-line form, `[[1, 2/3], [0, 1]]`.
impl fmt::Display for DenseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for i in 0..self.num_rows {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[")?;
            for (j, v) in self.row(i).iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{v}")?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}
