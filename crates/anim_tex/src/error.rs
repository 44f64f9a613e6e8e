//! String-builder error types.

/// Errors raised while building matrices or their LaTeX.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TexError {
    /// Left columns differ from right rows in a product.
    #[error("matrix dimensions {left:?} and {right:?} do not match")]
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    /// A row whose length differs from the first row's.
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// No rows, or rows without cells.
    #[error("matrix must have at least one row and one column")]
    Empty,

    /// The determinant expansion is only written out for 2×2 matrices.
    #[error("expected a 2x2 matrix, got {rows}x{cols}")]
    NotSquare2 { rows: usize, cols: usize },
}
