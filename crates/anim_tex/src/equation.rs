//! Equations assembled from matrix strings, with colour assignments.

use anim_object::{Color, Highlight, VisualObject};

use crate::builder::{Bracket, matrix_determinant_text, matrix_multiply_text, matrix_to_text};
use crate::error::TexError;
use crate::expr::{Operand, Role, Scope, Tag, TexBuilder, TexExpr};
use crate::matrix::Matrix;

/// Colours for the four cells of a 2×2 determinant, row-major.
const DETERMINANT_PALETTE: [Color; 4] = [Color::YELLOW, Color::RED, Color::GREEN, Color::BLUE];

/// A [`TexExpr`] plus the byte ranges to colour when it is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct ColoredTex {
    expr: TexExpr,
    highlights: Vec<Highlight>,
}

impl ColoredTex {
    #[must_use]
    pub fn new(expr: TexExpr) -> Self {
        Self {
            expr,
            highlights: Vec::new(),
        }
    }

    #[must_use]
    pub fn expr(&self) -> &TexExpr {
        &self.expr
    }

    #[must_use]
    pub fn highlights(&self) -> &[Highlight] {
        &self.highlights
    }

    /// Colour the span of `tag`. Returns `false` if the tag is absent.
    pub fn paint(&mut self, tag: impl Into<Tag>, color: Color) -> bool {
        match self.expr.span(tag) {
            Some(span) => {
                self.highlights.push(Highlight {
                    bytes: span.bytes,
                    color,
                });
                true
            }
            None => false,
        }
    }

    /// Colour every tag matching `pred`. Returns how many were painted.
    pub fn paint_where(&mut self, pred: impl Fn(&Tag) -> bool, color: Color) -> usize {
        let spans: Vec<_> = self
            .expr
            .tags()
            .filter(|(tag, _)| pred(tag))
            .map(|(_, span)| span.bytes)
            .collect();
        let count = spans.len();
        self.highlights
            .extend(spans.into_iter().map(|bytes| Highlight { bytes, color }));
        count
    }

    /// Typeset object for the renderer.
    #[must_use]
    pub fn to_object(&self, font_size: f64) -> VisualObject {
        VisualObject::tex(self.expr.text(), font_size, self.highlights.clone())
    }
}

impl From<TexExpr> for ColoredTex {
    fn from(expr: TexExpr) -> Self {
        Self::new(expr)
    }
}

/// The two halves of "matrix times vector": ` \cdot <vector>` and
/// ` = <result>`.
///
/// A single-row `vector` is treated as a column. Numeric inputs are
/// multiplied out; anything symbolic is written as a sum of products
/// (`2x + 1y`).
///
/// # Errors
///
/// Returns [`TexError::DimensionMismatch`] when the matrix columns differ
/// from the vector length.
pub fn linear_transform_text(matrix: &Matrix, vector: &Matrix) -> Result<(TexExpr, TexExpr), TexError> {
    let vector = if vector.rows() == 1 {
        vector.transpose()
    } else {
        vector.clone()
    };

    let product = match matrix.numeric_product(&vector)? {
        Some(product) => matrix_to_text(&product, Bracket::BMatrix),
        None => matrix_multiply_text(matrix, &vector, false, false)?,
    };

    let mut mul = TexBuilder::new();
    mul.push(" ")
        .push_tagged(Role::Operator(0), r"\cdot")
        .push(" ")
        .append(matrix_to_text(&vector, Bracket::BMatrix).scoped(Scope::Vector));

    let mut result = TexBuilder::new();
    result
        .push(" ")
        .push_tagged(Role::Equals, "=")
        .push(" ")
        .append(product.scoped(Scope::Result));

    Ok((mul.finish(), result.finish()))
}

/// `A\cdot B=<A·B written out>`, coloured: cells of `a` and their factors
/// yellow, cells of `b` and their factors blue, operators red, `=` green.
///
/// # Errors
///
/// Returns [`TexError::DimensionMismatch`] when `a.cols() != b.rows()`.
pub fn multiplication_question(a: &Matrix, b: &Matrix) -> Result<ColoredTex, TexError> {
    let product = matrix_multiply_text(a, b, false, false)?;

    let mut builder = TexBuilder::new();
    builder
        .append(matrix_to_text(a, Bracket::BMatrix).scoped(Scope::Left))
        .push_tagged(Role::Operator(0), r"\cdot")
        .append(matrix_to_text(b, Bracket::BMatrix).scoped(Scope::Right))
        .push_tagged(Role::Equals, "=")
        .append(product.scoped(Scope::Result));

    let mut tex = ColoredTex::new(builder.finish());
    let operand_of = |tag: &Tag| match (tag.scope, tag.role) {
        (Scope::Left, Role::Cell { .. }) => Some(Operand::Left),
        (Scope::Right, Role::Cell { .. }) => Some(Operand::Right),
        (Scope::Result, Role::Factor { operand, .. }) => Some(operand),
        _ => None,
    };
    tex.paint_where(|t| operand_of(t) == Some(Operand::Left), Color::YELLOW);
    tex.paint_where(|t| operand_of(t) == Some(Operand::Right), Color::BLUE);
    tex.paint_where(
        |t| matches!(t.role, Role::Operator(_) | Role::Plus { .. }),
        Color::RED,
    );
    tex.paint(Role::Equals, Color::GREEN);
    Ok(tex)
}

/// `Det(A) = ad-bc` for a 2×2 matrix, each cell coloured the same in the
/// matrix and in the expansion. Numeric cells are parenthesised in the
/// expansion so adjacent numbers stay readable.
///
/// # Errors
///
/// Returns [`TexError::NotSquare2`] for any other shape.
pub fn determinant_question(a: &Matrix) -> Result<ColoredTex, TexError> {
    let (rows, cols) = a.shape();
    if (rows, cols) != (2, 2) {
        return Err(TexError::NotSquare2 { rows, cols });
    }

    let factor = |b: &mut TexBuilder, row: usize, col: usize| {
        let cell = a.at(row, col);
        let numeric = !cell.is_symbolic();
        if numeric {
            b.push("(");
        }
        b.push_tagged(Role::Cell { row, col }, cell.to_string());
        if numeric {
            b.push(")");
        }
    };
    let mut expansion = TexBuilder::new();
    factor(&mut expansion, 0, 0);
    factor(&mut expansion, 1, 1);
    expansion.push_tagged(Role::Operator(0), "-");
    factor(&mut expansion, 0, 1);
    factor(&mut expansion, 1, 0);

    let mut builder = TexBuilder::new();
    builder
        .append(matrix_determinant_text(a))
        .push(" ")
        .push_tagged(Role::Equals, "=")
        .push(" ")
        .append(expansion.finish().scoped(Scope::Result));

    let mut tex = ColoredTex::new(builder.finish());
    for (i, color) in DETERMINANT_PALETTE.into_iter().enumerate() {
        let role = Role::Cell {
            row: i / 2,
            col: i % 2,
        };
        tex.paint(role, color);
        tex.paint(Tag::new(Scope::Result, role), color);
    }
    Ok(tex)
}
