//! The matrix series: what a matrix is, what it does to space, and how
//! products and determinants read geometrically.

use anim_math::{Axis, DVec3};
use anim_object::{Color, Highlight, UP, VisualObject};
use anim_scene::geometry::{EXAMPLE_MATRIX, EXAMPLE_VECTOR};
use anim_scene::{
    Animation, GeometrySetup, MatrixDrawing, MatrixGeometry, Scene, SceneContext, SceneError,
};
use anim_tex::{
    Bracket, Cell, ColoredTex, Matrix, Role, determinant_question, matrix_to_text_isolated,
    multiplication_question,
};

const TITLE_FONT: f64 = 72.0;
const BODY_FONT: f64 = 48.0;
const EDGE_BUFF: f64 = 0.5;

/// The second transform of the multiplication scene, row-major.
const SECOND_MATRIX: [[f64; 2]; 2] = [[0.0, -1.0], [1.0, 1.0]];

/// Write `object` at the origin, hold it, then fade it out.
fn ask(ctx: &mut SceneContext, object: VisualObject, run_time: f64, hold: bool) {
    let id = ctx.insert(object);
    ctx.play_for(vec![Animation::Write { target: id }], run_time);
    if hold {
        ctx.wait();
    }
    ctx.play(vec![Animation::FadeOut { target: id }]);
}

fn write_title(ctx: &mut SceneContext, text: &str) {
    let mut title = VisualObject::text(text, BODY_FONT);
    title.to_edge(UP, EDGE_BUFF);
    let id = ctx.insert(title);
    ctx.play(vec![Animation::Write { target: id }]);
}

fn abcd(symbols: [&str; 4]) -> Result<Matrix, SceneError> {
    let [a, b, c, d] = symbols;
    Ok(Matrix::from_rows([[a, b], [c, d]])?)
}

/// Four questions in a row: what is a matrix, how do you multiply, what is a
/// determinant, what is an eigenvalue.
#[derive(Debug, Clone, Copy)]
pub struct OpeningScene;

impl Scene for OpeningScene {
    fn name(&self) -> &str {
        "OpeningScene"
    }

    fn construct(&self, ctx: &mut SceneContext) -> Result<(), SceneError> {
        let product =
            multiplication_question(&abcd(["a", "b", "c", "d"])?, &abcd(["e", "f", "g", "h"])?)?;
        let determinant = determinant_question(&abcd(["a", "b", "c", "d"])?)?;

        const EIGEN: &str = r"Det(A - \lambda I) = 0";
        const LAMBDA: &str = r"\lambda";
        let highlights = EIGEN
            .find(LAMBDA)
            .map(|start| Highlight {
                bytes: start..start + LAMBDA.len(),
                color: Color::YELLOW,
            })
            .into_iter()
            .collect();

        ctx.wait_for(2.0);
        ask(ctx, VisualObject::text("MATRIX?", TITLE_FONT), 5.0, true);
        ask(ctx, product.to_object(TITLE_FONT), 1.5, true);
        ask(ctx, determinant.to_object(TITLE_FONT), 1.5, true);
        ask(ctx, VisualObject::tex(EIGEN, TITLE_FONT, highlights), 1.0, false);
        ctx.clear();
        Ok(())
    }
}

/// One vector on the full-frame plane, carried through the example matrix.
#[derive(Debug, Clone, Copy)]
pub struct CenteredGeometryScene;

impl Scene for CenteredGeometryScene {
    fn name(&self) -> &str {
        "CenteredGeometryScene"
    }

    fn construct(&self, ctx: &mut SceneContext) -> Result<(), SceneError> {
        let mut geometry = MatrixGeometry::setup(ctx, GeometrySetup::default());
        geometry.draw_vectors(ctx, EXAMPLE_VECTOR, Color::YELLOW);
        geometry.transform_space(ctx, EXAMPLE_MATRIX, None);
        ctx.clear();
        Ok(())
    }
}

/// [`CenteredGeometryScene`] with a caption.
#[derive(Debug, Clone, Copy)]
pub struct CenteredGeometryWithTextScene;

impl Scene for CenteredGeometryWithTextScene {
    fn name(&self) -> &str {
        "CenteredGeometryWithTextScene"
    }

    fn construct(&self, ctx: &mut SceneContext) -> Result<(), SceneError> {
        let mut geometry = MatrixGeometry::setup(ctx, GeometrySetup::default());
        geometry.draw_vectors(ctx, EXAMPLE_VECTOR, Color::YELLOW);
        write_title(ctx, "Matrix is an action of transforming space");
        geometry.transform_space(ctx, EXAMPLE_MATRIX, None);
        ctx.clear();
        Ok(())
    }
}

/// Two transforms in a row.
#[derive(Debug, Clone, Copy)]
pub struct MatrixMultiplicationGeometryScene;

impl Scene for MatrixMultiplicationGeometryScene {
    fn name(&self) -> &str {
        "MatrixMultiplicationGeometryScene"
    }

    fn construct(&self, ctx: &mut SceneContext) -> Result<(), SceneError> {
        let mut geometry = MatrixGeometry::setup(ctx, GeometrySetup::default());
        geometry.draw_vectors(ctx, EXAMPLE_VECTOR, Color::YELLOW);
        write_title(ctx, "Matrix multiplication is simply transforming space twice");
        geometry.transform_space(ctx, EXAMPLE_MATRIX, None);
        geometry.transform_space(ctx, SECOND_MATRIX, None);
        ctx.clear();
        Ok(())
    }
}

/// The unit square after a transform; its area is the determinant.
#[derive(Debug, Clone, Copy)]
pub struct MatrixDeterminantGeometryScene;

impl Scene for MatrixDeterminantGeometryScene {
    fn name(&self) -> &str {
        "MatrixDeterminantGeometryScene"
    }

    fn construct(&self, ctx: &mut SceneContext) -> Result<(), SceneError> {
        let mut geometry = MatrixGeometry::setup(ctx, GeometrySetup::default());
        geometry.transform_space(ctx, EXAMPLE_MATRIX, Some(2.0));
        geometry.determinant_area(ctx)?;
        ctx.clear();
        Ok(())
    }
}

/// Where the written product sits, left of centre.
const NUMERICAL_POSITION: DVec3 = DVec3::new(-4.5, 0.5, 0.0);

/// A half-scale space on the right half of the frame.
fn side_space(ctx: &mut SceneContext) -> MatrixGeometry {
    let setup = GeometrySetup {
        origin: DVec3::new(4.5, 0.5, 0.0),
        scale: 0.5,
        mask: vec![
            DVec3::new(0.0, 5.0, 0.0),
            DVec3::new(0.0, -5.0, 0.0),
            DVec3::new(10.0, -5.0, 0.0),
            DVec3::new(10.0, 5.0, 0.0),
        ],
        ..GeometrySetup::default()
    };
    MatrixGeometry::setup(ctx, setup)
}

/// Write the example matrix on the left, then `· vector = result` beside it.
///
/// The matrix is written transposed so that the column product on screen
/// equals the row-vector transform applied to the space. The example entries
/// are whole numbers and are written as integers.
fn write_product(ctx: &mut SceneContext, vector: [Cell; 2]) -> Result<(), SceneError> {
    let matrix = Matrix::from_rows(EXAMPLE_MATRIX.map(|row| row.map(whole)))?.transpose();
    let drawing = MatrixDrawing::new(ctx, matrix, NUMERICAL_POSITION, BODY_FONT);
    drawing.write(ctx);
    for term in drawing.linear_transform(ctx, &Matrix::column(vector)?)? {
        ctx.play(vec![Animation::Write { target: term }]);
    }
    Ok(())
}

fn whole(x: f64) -> Cell {
    Cell::Integer(x as i64)
}

fn finish_side_by_side(ctx: &mut SceneContext, geometry: &MatrixGeometry) {
    ctx.wait_for(2.0);
    geometry.fade_out(ctx);
    ctx.clear();
}

/// The product written out on the left, the same transform drawn on the
/// right.
#[derive(Debug, Clone, Copy)]
pub struct NumericalGeometricScene;

impl Scene for NumericalGeometricScene {
    fn name(&self) -> &str {
        "NumericalGeometricScene"
    }

    fn construct(&self, ctx: &mut SceneContext) -> Result<(), SceneError> {
        write_product(ctx, EXAMPLE_VECTOR.map(whole))?;
        ctx.wait();
        ctx.wait_for(2.0);

        let mut geometry = side_space(ctx);
        geometry.draw_vectors(ctx, EXAMPLE_VECTOR, Color::YELLOW);
        geometry.transform_space(ctx, EXAMPLE_MATRIX, Some(6.0));
        finish_side_by_side(ctx, &geometry);
        Ok(())
    }
}

/// [`NumericalGeometricScene`] with an unknown vector: the product reads as a
/// system of equations, and the circled point is its right-hand side.
#[derive(Debug, Clone, Copy)]
pub struct LinearEquationScene;

impl Scene for LinearEquationScene {
    fn name(&self) -> &str {
        "LinearEquationScene"
    }

    fn construct(&self, ctx: &mut SceneContext) -> Result<(), SceneError> {
        write_product(ctx, ["x".into(), "y".into()])?;
        ctx.wait_for(2.0);

        let mut geometry = side_space(ctx);
        geometry.draw_vectors(ctx, EXAMPLE_VECTOR, Color::YELLOW);
        let space = geometry.space();
        let target = space.origin() + DVec3::new(3.0 * space.unit_shift(Axis::X), 0.0, 0.0);
        let circle = ctx.insert(
            VisualObject::circle(target, 0.3 * space.scale()).with_color(Color::GREEN),
        );
        ctx.play(vec![Animation::Create { target: circle }]);
        geometry.transform_space(ctx, EXAMPLE_MATRIX, None);
        finish_side_by_side(ctx, &geometry);
        Ok(())
    }
}

/// A 3×3 symbolic matrix written with each cell isolated, the first row
/// picked out in colour.
#[derive(Debug, Clone, Copy)]
pub struct MatrixExampleScene;

impl MatrixExampleScene {
    const CELLS: [[&'static str; 3]; 3] = [
        ["a1", "b", "e"],
        ["c", "d", "f23"],
        ["ge", "h123", "imn"],
    ];
    const FIRST_ROW: [Color; 3] = [Color::YELLOW, Color::BLUE, Color::RED];
}

impl Scene for MatrixExampleScene {
    fn name(&self) -> &str {
        "MatrixExampleScene"
    }

    fn construct(&self, ctx: &mut SceneContext) -> Result<(), SceneError> {
        let matrix = Matrix::from_rows(Self::CELLS)?;
        let mut tex = ColoredTex::new(matrix_to_text_isolated(&matrix, Bracket::BMatrix));
        for (col, color) in Self::FIRST_ROW.into_iter().enumerate() {
            tex.paint(Role::Cell { row: 0, col }, color);
        }
        let id = ctx.insert(tex.to_object(TITLE_FONT));
        ctx.play(vec![Animation::Write { target: id }]);
        ctx.wait();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use anim_object::Shape;
    use anim_scene::{RecordingRenderer, ScenePlan, SceneRunner, Step};

    use super::*;
    use crate::scenes::test_config;

    fn plan(scene: &dyn Scene) -> ScenePlan {
        ScenePlan::build(scene, &test_config()).unwrap()
    }

    #[test]
    fn test_opening_writes_four_questions() {
        let plan = plan(&OpeningScene);
        let writes = plan
            .script()
            .steps()
            .iter()
            .filter(|s| matches!(s, Step::Play { animations, .. }
                if matches!(animations[0], Animation::Write { .. })))
            .count();
        assert_eq!(writes, 4);
        assert!(matches!(plan.script().steps().last(), Some(Step::Clear { .. })));
    }

    #[test]
    fn test_numerical_product_matches_geometry() {
        let plan = plan(&NumericalGeometricScene);
        let sources: Vec<&str> = plan
            .store()
            .iter()
            .filter_map(|o| match &o.shape {
                Shape::Tex { source, .. } => Some(source.as_str()),
                _ => None,
            })
            .collect();
        assert!(sources.contains(&r" = \begin{bmatrix} -1 \\ 5 \end{bmatrix}"));
    }

    #[test]
    fn test_example_matrix_isolates_cells() {
        let plan = plan(&MatrixExampleScene);
        let Some(Shape::Tex {
            source, highlights, ..
        }) = plan.store().iter().next().map(|o| &o.shape)
        else {
            panic!("expected tex");
        };
        assert_eq!(
            source,
            r"\begin{bmatrix} {{a1}} & {{b}} & {{e}} \\ {{c}} & {{d}} & {{f23}} \\ {{ge}} & {{h123}} & {{imn}} \end{bmatrix}"
        );
        let painted: Vec<&str> = highlights.iter().map(|h| &source[h.bytes.clone()]).collect();
        assert_eq!(painted, ["a1", "b", "e"]);
        assert_eq!(plan.script().len(), 2);
    }

    #[test]
    fn test_vector_lands_on_transformed_point() {
        let mut plan = plan(&CenteredGeometryScene);
        let mut runner = SceneRunner::new(RecordingRenderer::new(), test_config());
        runner.play(&mut plan).unwrap();
        // (1, 2)·[[1, 1], [-1, 2]] = (-1, 5)
        let landed = plan.store().iter().any(|o| {
            matches!(o.shape, Shape::Arrow { .. })
                && (o.points[1] - DVec3::new(-1.0, 5.0, 0.0)).length() < 1e-9
        });
        assert!(landed);
    }

    #[test]
    fn test_linear_equation_circles_right_hand_side() {
        let plan = plan(&LinearEquationScene);
        let circle = plan
            .store()
            .iter()
            .find(|o| matches!(o.shape, Shape::Circle { .. }))
            .unwrap();
        assert!((circle.points[0] - DVec3::new(6.0, 0.5, 0.0)).length() < 1e-9);
    }
}
