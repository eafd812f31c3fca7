//! Dense matrices with exact elimination.
//!
//! Functional-value matrices are small (a handful of rows), so a row-major
//! `Vec` and plain Gauss–Jordan elimination are all that is needed. Storage
//! and shape operations work for any `Clone` entry type, which lets a matrix
//! of expression handles be built first and lowered to a ring afterwards.

use std::ops::{Index, IndexMut};

use cspace_rings::traits::{Field, Ring};

use crate::error::SolveError;

/// Dense matrix stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseMatrix<R> {
    /// Matrix entries in row-major order.
    data: Vec<R>,
    /// Number of rows.
    num_rows: usize,
    /// Number of columns.
    num_cols: usize,
}

impl<R: Clone> DenseMatrix<R> {
    /// Creates a matrix whose entry `(i, j)` is `f(i, j)`.
    pub fn from_fn(num_rows: usize, num_cols: usize, mut f: impl FnMut(usize, usize) -> R) -> Self {
        let mut data = Vec::with_capacity(num_rows * num_cols);
        for i in 0..num_rows {
            for j in 0..num_cols {
                data.push(f(i, j));
            }
        }
        Self {
            data,
            num_rows,
            num_cols,
        }
    }

    /// Like [`from_fn`](Self::from_fn), stopping at the first error.
    ///
    /// Entries are produced row by row, left to right.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    pub fn try_from_fn<E>(
        num_rows: usize,
        num_cols: usize,
        mut f: impl FnMut(usize, usize) -> Result<R, E>,
    ) -> Result<Self, E> {
        let mut data = Vec::with_capacity(num_rows * num_cols);
        for i in 0..num_rows {
            for j in 0..num_cols {
                data.push(f(i, j)?);
            }
        }
        Ok(Self {
            data,
            num_rows,
            num_cols,
        })
    }

    /// Creates a matrix from a 2D vector.
    ///
    /// # Panics
    ///
    /// Panics if the rows have different lengths.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<R>>) -> Self {
        let num_rows = rows.len();
        let num_cols = rows.first().map_or(0, Vec::len);
        let data: Vec<R> = rows.into_iter().flatten().collect();
        assert_eq!(data.len(), num_rows * num_cols, "ragged rows");
        Self {
            data,
            num_rows,
            num_cols,
        }
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

    /// Checks if the matrix is square.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.num_rows == self.num_cols
    }

    /// Applies a fallible `f` to every entry, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    pub fn try_map<S, E>(&self, f: impl FnMut(&R) -> Result<S, E>) -> Result<DenseMatrix<S>, E> {
        Ok(DenseMatrix {
            data: self.data.iter().map(f).collect::<Result<_, _>>()?,
            num_rows: self.num_rows,
            num_cols: self.num_cols,
        })
    }

    /// Swaps two rows in-place.
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        let i_start = i * self.num_cols;
        let j_start = j * self.num_cols;
        for k in 0..self.num_cols {
            self.data.swap(i_start + k, j_start + k);
        }
    }
}

impl<R: Ring> DenseMatrix<R> {
    /// Adds a scaled row to another: row[target] += scale * row[source].
    pub fn add_scaled_row(&mut self, target: usize, source: usize, scale: &R) {
        for k in 0..self.num_cols {
            let val = self[(source, k)].clone() * scale.clone();
            self[(target, k)] = self[(target, k)].clone() + val;
        }
    }

    /// Scales a row by a scalar.
    pub fn scale_row(&mut self, row: usize, scale: &R) {
        for k in 0..self.num_cols {
            self[(row, k)] = self[(row, k)].clone() * scale.clone();
        }
    }
}

impl<R: Field> DenseMatrix<R> {
    /// Solves the square system `A x = b` by Gauss–Jordan elimination.
    ///
    /// The pivot of each column is the first remaining non-zero entry, so
    /// the solve succeeds exactly when `A` is non-singular.
    ///
    /// # Errors
    ///
    /// - [`SolveError::NotSquare`] / [`SolveError::RhsLength`] on shape errors
    /// - [`SolveError::Singular`] if a column has no non-zero candidate
    pub fn solve(&self, b: &[R]) -> Result<Vec<R>, SolveError> {
        if !self.is_square() {
            return Err(SolveError::NotSquare {
                rows: self.num_rows,
                cols: self.num_cols,
            });
        }
        if b.len() != self.num_rows {
            return Err(SolveError::RhsLength {
                expected: self.num_rows,
                found: b.len(),
            });
        }

        let n = self.num_rows;
        // Augmented matrix [A | b]
        let mut aug = Self::from_fn(n, n + 1, |i, j| {
            if j < n {
                self[(i, j)].clone()
            } else {
                b[i].clone()
            }
        });

        for col in 0..n {
            let pivot = (col..n).find_map(|row| aug[(row, col)].inv().map(|inv| (row, inv)));
            let Some((pivot_row, inv)) = pivot else {
                return Err(SolveError::Singular { column: col });
            };

            aug.swap_rows(col, pivot_row);
            aug.scale_row(col, &inv);

            // Clear the column above and below the pivot
            for row in 0..n {
                if row != col && !aug[(row, col)].is_zero() {
                    let factor = -aug[(row, col)].clone();
                    aug.add_scaled_row(row, col, &factor);
                }
            }
        }

        Ok((0..n).map(|row| aug[(row, n)].clone()).collect())
    }
}

impl<R> Index<(usize, usize)> for DenseMatrix<R> {
    type Output = R;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.data[row * self.num_cols + col]
    }
}

impl<R> IndexMut<(usize, usize)> for DenseMatrix<R> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.data[row * self.num_cols + col]
    }
}
