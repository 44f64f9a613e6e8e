//! Matrix, determinant and product strings.
//!
//! Output is fixed byte for byte: cells joined by ` & `, rows by ` \\ `,
//! wrapped in `\begin{..} .. \end{..}` with single spaces inside the
//! brackets. Downstream colouring depends on it; treat any change to spacing
//! or order as breaking.

use serde::{Deserialize, Serialize};

use crate::error::TexError;
use crate::expr::{Operand, Role, TexBuilder, TexExpr};
use crate::matrix::{Cell, Matrix};

/// LaTeX matrix environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Bracket {
    /// Square brackets.
    #[default]
    BMatrix,
    /// Parentheses.
    PMatrix,
    /// Vertical bars.
    VMatrix,
    /// No delimiters.
    Matrix,
}

impl Bracket {
    #[must_use]
    pub const fn environment(self) -> &'static str {
        match self {
            Self::BMatrix => "bmatrix",
            Self::PMatrix => "pmatrix",
            Self::VMatrix => "vmatrix",
            Self::Matrix => "matrix",
        }
    }
}

/// Write `rows × cols` cells inside `bracket`, tagging brackets, body, cells
/// and separators. `cell` writes the content of one cell.
fn write_grid(
    b: &mut TexBuilder,
    rows: usize,
    cols: usize,
    bracket: Bracket,
    mut cell: impl FnMut(&mut TexBuilder, usize, usize),
) {
    let env = bracket.environment();
    b.push_tagged(Role::Open, format!("\\begin{{{env}}}"));
    b.push(" ");
    b.tagged(Role::Body, |b| {
        for row in 0..rows {
            for col in 0..cols {
                b.tagged(Role::Cell { row, col }, |b| cell(b, row, col));
                if col + 1 < cols {
                    b.push(" ")
                        .push_tagged(Role::ColumnSeparator { row, col }, "&")
                        .push(" ");
                }
            }
            if row + 1 < rows {
                b.push(" ")
                    .push_tagged(Role::RowSeparator { row }, r"\\")
                    .push(" ");
            }
        }
    });
    b.push(" ");
    b.push_tagged(Role::Close, format!("\\end{{{env}}}"));
}

/// `\begin{bmatrix} a & b \\ c & d \end{bmatrix}` for `[[a, b], [c, d]]`.
#[must_use]
pub fn matrix_to_text(matrix: &Matrix, bracket: Bracket) -> TexExpr {
    let mut b = TexBuilder::new();
    write_grid(&mut b, matrix.rows(), matrix.cols(), bracket, |b, r, c| {
        b.push(matrix.at(r, c).to_string());
    });
    b.finish()
}

/// Like [`matrix_to_text`] but every cell is wrapped in `{{..}}`, for engines
/// that split typeset output on double braces. The cell tag covers the cell
/// text only.
#[must_use]
pub fn matrix_to_text_isolated(matrix: &Matrix, bracket: Bracket) -> TexExpr {
    let mut b = TexBuilder::new();
    write_grid(&mut b, matrix.rows(), matrix.cols(), bracket, |b, r, c| {
        b.push("{{").push(matrix.at(r, c).to_string()).push("}}");
    });
    b.finish()
}

/// `Det \begin{pmatrix} .. \end{pmatrix}`.
#[must_use]
pub fn matrix_determinant_text(matrix: &Matrix) -> TexExpr {
    let mut b = TexBuilder::new();
    b.push_tagged(Role::Prefix, "Det")
        .push(" ")
        .append(matrix_to_text(matrix, Bracket::PMatrix));
    b.finish()
}

/// The product `a · b` written out: cell `(i, j)` is
/// `a[i][0]·b[0][j] + a[i][1]·b[1][j] + ...`.
///
/// Each product term is `(x)\cdot(y)` with both flags, `(x)(y)` with braces
/// only, `x\cdoty` with the dot only and `xy` with neither.
///
/// # Errors
///
/// Returns [`TexError::DimensionMismatch`] when `a.cols() != b.rows()`.
pub fn matrix_multiply_text(
    a: &Matrix,
    b: &Matrix,
    with_braces: bool,
    with_dot: bool,
) -> Result<TexExpr, TexError> {
    if a.cols() != b.rows() {
        return Err(TexError::DimensionMismatch {
            left: a.shape(),
            right: b.shape(),
        });
    }

    let factor = |builder: &mut TexBuilder, role: Role, cell: &Cell| {
        if with_braces {
            builder.push("(");
        }
        builder.push_tagged(role, cell.to_string());
        if with_braces {
            builder.push(")");
        }
    };

    let mut builder = TexBuilder::new();
    write_grid(&mut builder, a.rows(), b.cols(), Bracket::BMatrix, |out, row, col| {
        for term in 0..a.cols() {
            if term > 0 {
                out.push(" ")
                    .push_tagged(Role::Plus { row, col, term }, "+")
                    .push(" ");
            }
            out.tagged(Role::Term { row, col, term }, |out| {
                let left = Role::Factor {
                    row,
                    col,
                    term,
                    operand: Operand::Left,
                };
                factor(out, left, a.at(row, term));
                if with_dot {
                    out.push_tagged(Role::Dot { row, col, term }, r"\cdot");
                }
                let right = Role::Factor {
                    row,
                    col,
                    term,
                    operand: Operand::Right,
                };
                factor(out, right, b.at(term, col));
            });
        }
    });
    Ok(builder.finish())
}


#[cfg(test)]
mod proptest_layout {
    use proptest::prelude::*;

    use super::*;

    fn cell_strategy() -> impl Strategy<Value = Cell> {
        prop_oneof![
            "[a-z][a-z0-9]{0,3}".prop_map(Cell::Symbol),
            any::<i32>().prop_map(Cell::from),
            (-1.0e6..1.0e6f64).prop_map(Cell::Number),
        ]
    }

    fn grid(rows: usize, cols: usize) -> impl Strategy<Value = Vec<Vec<Cell>>> {
        prop::collection::vec(prop::collection::vec(cell_strategy(), cols), rows)
    }

    prop_compose! {
        fn matrix_strategy()(rows in 1usize..6, cols in 1usize..6)
            (cells in grid(rows, cols)) -> Vec<Vec<Cell>> {
            cells
        }
    }

    prop_compose! {
        fn product_strategy()(rows in 1usize..5, inner in 1usize..5, cols in 1usize..5)
            (a in grid(rows, inner), b in grid(inner, cols)) -> (Vec<Vec<Cell>>, Vec<Vec<Cell>>) {
            (a, b)
        }
    }

    proptest! {
        #[test]
        fn test_text_splits_back_into_cells_for_any_shape(cells in matrix_strategy()) {
            let m = Matrix::from_rows(cells.clone()).unwrap();
            let text = matrix_to_text(&m, Bracket::BMatrix).into_text();
            let body = text
                .strip_prefix(r"\begin{bmatrix} ")
                .and_then(|t| t.strip_suffix(r" \end{bmatrix}"))
                .unwrap();
            let parsed: Vec<Vec<String>> = body
                .split(r" \\ ")
                .map(|row| row.split(" & ").map(str::to_string).collect())
                .collect();
            let expected: Vec<Vec<String>> = cells
                .iter()
                .map(|row| row.iter().map(Cell::to_string).collect())
                .collect();
            prop_assert_eq!(parsed, expected);
        }

        #[test]
        fn test_multiply_term_count_for_any_shape(
            (a, b) in product_strategy(),
            with_braces in any::<bool>(),
            with_dot in any::<bool>()
        ) {
            let a = Matrix::from_rows(a).unwrap();
            let b = Matrix::from_rows(b).unwrap();
            let expr = matrix_multiply_text(&a, &b, with_braces, with_dot).unwrap();
            for row in 0..a.rows() {
                for col in 0..b.cols() {
                    let cell = expr.slice(Role::Cell { row, col }).unwrap();
                    prop_assert_eq!(cell.split(" + ").count(), a.cols());
                }
            }
            let past_last_row = Role::Cell { row: a.rows(), col: 0 };
            let past_last_col = Role::Cell { row: 0, col: b.cols() };
            prop_assert!(expr.span(past_last_row).is_none());
            prop_assert!(expr.span(past_last_col).is_none());
        }
    }
}
