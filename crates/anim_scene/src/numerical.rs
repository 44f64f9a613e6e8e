//! A matrix written out on screen, and the products it is applied to.

use anim_object::{Color, ObjectId, RIGHT};
use anim_tex::{Bracket, ColoredTex, Matrix, Role, Scope, Tag, linear_transform_text, matrix_to_text};
use glam::DVec3;

use crate::error::SceneError;
use crate::script::SceneContext;
use crate::step::Animation;

/// Gap between a matrix and the terms written beside it.
pub const TERM_BUFF: f64 = 0.25;

/// A typeset matrix with its entries in blue.
#[derive(Debug, Clone)]
pub struct MatrixDrawing {
    matrix: Matrix,
    font_size: f64,
    tex: ObjectId,
}

impl MatrixDrawing {
    /// Typeset `matrix` centred on `position`. Not shown yet.
    pub fn new(ctx: &mut SceneContext, matrix: Matrix, position: DVec3, font_size: f64) -> Self {
        let mut tex = ColoredTex::new(matrix_to_text(&matrix, Bracket::BMatrix));
        tex.paint(Role::Body, Color::BLUE);
        let mut object = tex.to_object(font_size);
        object.move_to(position);
        let tex = ctx.insert(object);
        Self {
            matrix,
            font_size,
            tex,
        }
    }

    #[must_use]
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    #[must_use]
    pub fn tex(&self) -> ObjectId {
        self.tex
    }

    /// Write the matrix, then wait.
    pub fn write(&self, ctx: &mut SceneContext) {
        ctx.play(vec![Animation::Write { target: self.tex }]);
        ctx.wait();
    }

    /// Typeset ` \cdot v` and ` = Mv` to the right of the matrix. The vector
    /// entries are yellow, the dot red and the result green.
    ///
    /// Returns the two terms in reading order, not yet shown.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Tex`] when the vector length differs from the
    /// matrix width.
    pub fn linear_transform(
        &self,
        ctx: &mut SceneContext,
        vector: &Matrix,
    ) -> Result<[ObjectId; 2], SceneError> {
        let (mul, result) = linear_transform_text(&self.matrix, vector)?;

        let mut mul = ColoredTex::new(mul);
        mul.paint(Tag::new(Scope::Vector, Role::Body), Color::YELLOW);
        mul.paint(Role::Operator(0), Color::RED);
        let mut result = ColoredTex::new(result);
        result.paint(Tag::new(Scope::Result, Role::Body), Color::GREEN);

        let anchor = ctx.object(self.tex)?.clone();
        let mut mul_object = mul.to_object(self.font_size);
        mul_object.next_to(&anchor, RIGHT, TERM_BUFF);
        let mut result_object = result.to_object(self.font_size);
        result_object.next_to(&mul_object, RIGHT, TERM_BUFF);

        Ok([ctx.insert(mul_object), ctx.insert(result_object)])
    }
}

#[cfg(test)]
mod tests {
    use anim_object::Shape;

    use super::*;
    use crate::config::SceneConfig;

    fn tex_source(ctx: &SceneContext, id: ObjectId) -> String {
        match &ctx.object(id).unwrap().shape {
            Shape::Tex { source, .. } => source.clone(),
            other => panic!("expected tex, got {other:?}"),
        }
    }

    #[test]
    fn test_matrix_body_is_blue() {
        let mut ctx = SceneContext::new(SceneConfig::default());
        let m = Matrix::from_rows([[1, -1], [1, 2]]).unwrap();
        let drawing = MatrixDrawing::new(&mut ctx, m, DVec3::new(-4.5, 0.5, 0.0), 48.0);
        let object = ctx.object(drawing.tex()).unwrap();
        assert_eq!(object.center(), DVec3::new(-4.5, 0.5, 0.0));
        let Shape::Tex { source, highlights, .. } = &object.shape else {
            panic!("expected tex");
        };
        assert_eq!(highlights.len(), 1);
        assert_eq!(highlights[0].color, Color::BLUE);
        assert_eq!(&source[highlights[0].bytes.clone()], r"1 & -1 \\ 1 & 2");
    }

    #[test]
    fn test_linear_transform_terms_placed_right() {
        let mut ctx = SceneContext::new(SceneConfig::default());
        let m = Matrix::from_rows([[1, -1], [1, 2]]).unwrap();
        let drawing = MatrixDrawing::new(&mut ctx, m, DVec3::ZERO, 48.0);
        let v = Matrix::from_rows([[1, 2]]).unwrap();
        let [mul, result] = drawing.linear_transform(&mut ctx, &v).unwrap();

        assert_eq!(tex_source(&ctx, mul), r" \cdot \begin{bmatrix} 1 \\ 2 \end{bmatrix}");
        assert_eq!(tex_source(&ctx, result), r" = \begin{bmatrix} -1 \\ 5 \end{bmatrix}");
        let x_mul = ctx.object(mul).unwrap().center().x;
        let x_result = ctx.object(result).unwrap().center().x;
        assert!(x_mul > 0.0);
        assert!(x_result > x_mul);
    }

    #[test]
    fn test_linear_transform_symbolic_vector() {
        let mut ctx = SceneContext::new(SceneConfig::default());
        let m = Matrix::from_rows([[1, -1], [1, 2]]).unwrap();
        let drawing = MatrixDrawing::new(&mut ctx, m, DVec3::ZERO, 48.0);
        let v = Matrix::column(["x", "y"]).unwrap();
        let [_, result] = drawing.linear_transform(&mut ctx, &v).unwrap();
        assert_eq!(
            tex_source(&ctx, result),
            r" = \begin{bmatrix} 1x + -1y \\ 1x + 2y \end{bmatrix}"
        );
    }

    #[test]
    fn test_linear_transform_mismatch() {
        let mut ctx = SceneContext::new(SceneConfig::default());
        let m = Matrix::from_rows([[1, 2, 3]]).unwrap();
        let drawing = MatrixDrawing::new(&mut ctx, m, DVec3::ZERO, 48.0);
        let v = Matrix::column([1, 2]).unwrap();
        assert!(matches!(
            drawing.linear_transform(&mut ctx, &v),
            Err(SceneError::Tex(_))
        ));
    }
}
