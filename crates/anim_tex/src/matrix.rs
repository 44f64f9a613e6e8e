//! Matrices of numeric or symbolic cells.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TexError;

/// One matrix entry. Rendered with [`Display`](fmt::Display) and nothing else:
/// no rounding, no padding. Floats keep their fractional part (`2.0`, not `2`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Integer(i64),
    Number(f64),
    Symbol(String),
}

impl Cell {
    /// Numeric value, if the cell is not symbolic.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Number(x) => Some(*x),
            Self::Symbol(_) => None,
        }
    }

    #[must_use]
    pub fn is_symbolic(&self) -> bool {
        matches!(self, Self::Symbol(_))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Number(x) => write!(f, "{x:?}"),
            Self::Symbol(s) => f.write_str(s),
        }
    }
}

impl From<i32> for Cell {
    fn from(n: i32) -> Self {
        Self::Integer(n.into())
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<f64> for Cell {
    fn from(x: f64) -> Self {
        Self::Number(x)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Self::Symbol(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Self::Symbol(s)
    }
}

impl From<char> for Cell {
    fn from(c: char) -> Self {
        Self::Symbol(c.to_string())
    }
}

/// A rectangular, row-major grid of [`Cell`]s with at least one cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Matrix {
    /// Build from rows of anything convertible to [`Cell`].
    ///
    /// # Errors
    ///
    /// Returns [`TexError::Empty`] for no rows or empty rows and
    /// [`TexError::Ragged`] when rows differ in length.
    pub fn from_rows<R, C>(rows: impl IntoIterator<Item = R>) -> Result<Self, TexError>
    where
        R: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        let mut cells = Vec::new();
        let mut cols = 0;
        let mut count = 0;
        for (row, items) in rows.into_iter().enumerate() {
            let before = cells.len();
            cells.extend(items.into_iter().map(Into::into));
            let found = cells.len() - before;
            if row == 0 {
                cols = found;
            } else if found != cols {
                return Err(TexError::Ragged {
                    row,
                    expected: cols,
                    found,
                });
            }
            count += 1;
        }
        if count == 0 || cols == 0 {
            return Err(TexError::Empty);
        }
        Ok(Self {
            rows: count,
            cols,
            cells,
        })
    }

    /// An `n × 1` column vector.
    ///
    /// # Errors
    ///
    /// Returns [`TexError::Empty`] if `cells` is empty.
    pub fn column<C: Into<Cell>>(cells: impl IntoIterator<Item = C>) -> Result<Self, TexError> {
        Self::from_rows(cells.into_iter().map(|c| [c]))
    }

    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Cell at an index already known to be in range.
    pub(crate) fn at(&self, row: usize, col: usize) -> &Cell {
        &self.cells[row * self.cols + col]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.cols)
    }

    #[must_use]
    pub fn transpose(&self) -> Self {
        let cells = (0..self.cols)
            .flat_map(|c| (0..self.rows).map(move |r| (r, c)))
            .map(|(r, c)| self.at(r, c).clone())
            .collect();
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.cells.iter().all(|c| !c.is_symbolic())
    }

    fn check_product(&self, other: &Matrix) -> Result<(), TexError> {
        if self.cols != other.rows {
            return Err(TexError::DimensionMismatch {
                left: self.shape(),
                right: other.shape(),
            });
        }
        Ok(())
    }

    /// The numeric product `self · other`, or `None` if either side has a
    /// symbolic cell. Integer-only inputs give integer cells.
    ///
    /// # Errors
    ///
    /// Returns [`TexError::DimensionMismatch`] when `self.cols != other.rows`.
    pub fn numeric_product(&self, other: &Matrix) -> Result<Option<Matrix>, TexError> {
        self.check_product(other)?;
        if !self.is_numeric() || !other.is_numeric() {
            return Ok(None);
        }
        let integral = self
            .cells
            .iter()
            .chain(&other.cells)
            .all(|c| matches!(c, Cell::Integer(_)));

        let mut cells = Vec::with_capacity(self.rows * other.cols);
        for i in 0..self.rows {
            for j in 0..other.cols {
                let cell = if integral {
                    self.integer_dot(other, i, j)
                        .map_or_else(|| Cell::Number(self.float_dot(other, i, j)), Cell::Integer)
                } else {
                    Cell::Number(self.float_dot(other, i, j))
                };
                cells.push(cell);
            }
        }
        Ok(Some(Self {
            rows: self.rows,
            cols: other.cols,
            cells,
        }))
    }

    fn integer_dot(&self, other: &Matrix, i: usize, j: usize) -> Option<i64> {
        (0..self.cols).try_fold(0i64, |acc, k| match (self.at(i, k), other.at(k, j)) {
            (Cell::Integer(a), Cell::Integer(b)) => acc.checked_add(a.checked_mul(*b)?),
            _ => None,
        })
    }

    fn float_dot(&self, other: &Matrix, i: usize, j: usize) -> f64 {
        (0..self.cols)
            .filter_map(|k| Some(self.at(i, k).as_f64()? * other.at(k, j).as_f64()?))
            .sum()
    }
}
