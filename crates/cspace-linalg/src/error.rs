//! Errors from exact linear solving.

use thiserror::Error;

/// Errors that can occur while solving a linear system.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The coefficient matrix is not square.
    #[error("coefficient matrix is {rows}x{cols}, expected a square matrix")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// The right-hand side does not have one entry per row.
    #[error("right-hand side has {found} entries, expected {expected}")]
    RhsLength {
        /// Number of matrix rows.
        expected: usize,
        /// Length of the right-hand side.
        found: usize,
    },

    /// Every remaining candidate in a pivot column is zero.
    #[error("singular system: no unique solution (column {column} has no pivot)")]
    Singular {
        /// The column without a pivot.
        column: usize,
    },
}
