//! The Pythagorean theorem: statement, triangle, and the three squares on
//! its sides, then the rearrangement proof inside a square of side `a + b`.

use std::f64::consts::{FRAC_PI_2, PI};

use anim_object::{Color, DOWN, LEFT, ObjectId, RIGHT, Style, UP, VisualObject};
use anim_math::DVec3;
use anim_scene::{Animation, Scene, SceneContext, SceneError};

const STATEMENT_FILE: &str = "pythagoras.txt";
const STATEMENT_FONT: f64 = 36.0;
const LABEL_FONT: f64 = 48.0;
const BUFF: f64 = 0.25;

/// Where the equation moves once the statement is gone.
const EQUATION_CORNER: DVec3 = DVec3::new(-3.0, 3.0, 0.0);

/// A 3-4-5 triangle at half size.
const BASE: f64 = 2.0;
const HEIGHT: f64 = 1.5;
const HYPOTENUSE: f64 = 2.5;

/// The triangle with its right angle at the bottom right, and its side
/// labels `a` (below), `b` (right) and `c` (hypotenuse).
fn labelled_triangle() -> (VisualObject, [VisualObject; 3]) {
    let b = 0.5 * BASE * LEFT;
    let c = 0.5 * BASE * RIGHT;
    let a = c + HEIGHT * UP;
    let figure = VisualObject::polygon(vec![b, c, a]);
    let mut side_a = VisualObject::tex("a", LABEL_FONT, Vec::new());
    side_a.next_to(&figure, DOWN, BUFF);
    let mut side_b = VisualObject::tex("b", LABEL_FONT, Vec::new());
    side_b.next_to(&figure, RIGHT, BUFF);
    let mut side_c = VisualObject::tex("c", LABEL_FONT, Vec::new());
    side_c.move_to(figure.center() + 0.5 * (UP + LEFT));
    (figure, [side_a, side_b, side_c])
}

/// One square on a side of the triangle, with its area label.
struct SideSquare {
    figure: ObjectId,
    label: ObjectId,
}

fn side_square(
    ctx: &mut SceneContext,
    side: f64,
    color: Color,
    label: &str,
    rotation: f64,
    shift: DVec3,
) -> SideSquare {
    let mut figure = VisualObject::square(side).with_color(color);
    figure.rotate(rotation).shift(shift);
    let mut label = VisualObject::tex(label, LABEL_FONT, Vec::new());
    label.next_to(&figure, LEFT, BUFF);
    SideSquare {
        figure: ctx.insert(figure),
        label: ctx.insert(label),
    }
}

/// `a^2 + b^2 = c^2` as five objects laid out left to right, so each term
/// can be indicated on its own.
fn equation(ctx: &mut SceneContext, below: &VisualObject) -> Vec<ObjectId> {
    let mut parts: Vec<VisualObject> = Vec::new();
    for term in ["a^2", "+", "b^2", "=", "c^2"] {
        let mut part = VisualObject::tex(term, LABEL_FONT, Vec::new());
        match parts.last() {
            Some(previous) => part.next_to(previous, RIGHT, BUFF),
            None => part.next_to(below, DOWN, BUFF),
        };
        parts.push(part);
    }
    parts.into_iter().map(|part| ctx.insert(part)).collect()
}

/// MoveTo animations that carry the equation so its first term lands on
/// `corner`, keeping the spacing.
fn move_equation(
    ctx: &SceneContext,
    parts: &[ObjectId],
    corner: DVec3,
) -> Result<Vec<Animation>, SceneError> {
    let Some(&first) = parts.first() else {
        return Ok(Vec::new());
    };
    let offset = corner - ctx.object(first)?.center();
    parts
        .iter()
        .map(|&target| {
            Ok(Animation::MoveTo {
                target,
                point: ctx.object(target)?.center() + offset,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy)]
pub struct PythagoreanTheoremScene;

impl Scene for PythagoreanTheoremScene {
    fn name(&self) -> &str {
        "PythagoreanTheoremScene"
    }

    fn construct(&self, ctx: &mut SceneContext) -> Result<(), SceneError> {
        // State the theorem.
        let text = ctx.statement(STATEMENT_FILE)?;
        let mut statement = VisualObject::text(text.trim(), STATEMENT_FONT);
        statement.to_edge(UP, BUFF);
        let equation = equation(ctx, &statement);
        let statement = ctx.insert(statement);
        ctx.play(vec![Animation::Write { target: statement }]);
        ctx.play(
            equation
                .iter()
                .map(|&target| Animation::Write { target })
                .collect(),
        );
        ctx.wait();

        // Triangle and side labels.
        let (figure, labels) = labelled_triangle();
        let triangle = ctx.insert(figure);
        ctx.play(vec![Animation::Create { target: triangle }]);
        let sides = labels.map(|side| ctx.insert(side));
        ctx.play(
            sides
                .iter()
                .map(|&target| Animation::Write { target })
                .collect(),
        );
        ctx.wait();

        // Squares on each side.
        let squares = [
            side_square(ctx, BASE, Color::GREEN, "a^2", 0.0, 0.5 * BASE * DOWN),
            side_square(
                ctx,
                HEIGHT,
                Color::RED,
                "b^2",
                0.0,
                0.5 * (BASE + HEIGHT) * RIGHT + 0.5 * HEIGHT * UP,
            ),
            side_square(
                ctx,
                HYPOTENUSE,
                Color::BLUE,
                "c^2",
                (HEIGHT / BASE).atan(),
                0.5 * HEIGHT * LEFT + 0.5 * (BASE + HEIGHT) * UP,
            ),
        ];
        let mut clear_statement = vec![Animation::FadeOut { target: statement }];
        clear_statement.extend(move_equation(ctx, &equation, EQUATION_CORNER)?);
        ctx.play(clear_statement);
        ctx.play(
            squares
                .iter()
                .map(|s| Animation::Create { target: s.figure })
                .collect(),
        );
        ctx.wait();
        ctx.play(
            squares
                .iter()
                .map(|s| Animation::Write { target: s.label })
                .collect(),
        );
        ctx.wait();

        // Match each term of the equation with its square.
        for (term, square) in equation.iter().step_by(2).zip(&squares) {
            ctx.play_for(
                vec![
                    Animation::Indicate { target: *term },
                    Animation::Indicate {
                        target: square.label,
                    },
                    Animation::Indicate {
                        target: square.figure,
                    },
                ],
                2.0,
            );
        }
        ctx.wait_for(2.0);
        Ok(())
    }
}

/// Fills of the four triangle copies in the proof.
const COPY_FILLS: [Color; 4] = [
    Color::from_hex(0xFFFF00),
    Color::from_hex(0xFFA500),
    Color::from_hex(0xFF0000),
    Color::from_hex(0x00FF00),
];
const SQUARE_FILL: Color = Color::from_hex(0x0000FF);
const FILL_OPACITY: f64 = 0.5;

/// Where one triangle copy sits inside the big square: its rotation from the
/// starting triangle, and the corner of the big square it is pushed into.
#[derive(Debug, Clone, Copy)]
struct Placement {
    rotation: f64,
    corner: DVec3,
}

impl Placement {
    const fn new(rotation: f64, corner: DVec3) -> Self {
        Self { rotation, corner }
    }
}

/// Right angles in the four corners; the hole in the middle is `c^2`.
const AROUND_HYPOTENUSE: [Placement; 4] = [
    Placement::new(-FRAC_PI_2, DVec3::new(-1.0, -1.0, 0.0)),
    Placement::new(PI, DVec3::new(-1.0, 1.0, 0.0)),
    Placement::new(FRAC_PI_2, DVec3::new(1.0, 1.0, 0.0)),
    Placement::new(0.0, DVec3::new(1.0, -1.0, 0.0)),
];

/// Two rectangles of two triangles each, leaving `a^2` top left and `b^2`
/// bottom right.
const AROUND_LEGS: [Placement; 4] = [
    Placement::new(-FRAC_PI_2, DVec3::new(1.0, 1.0, 0.0)),
    Placement::new(PI, DVec3::new(-1.0, -1.0, 0.0)),
    Placement::new(FRAC_PI_2, DVec3::new(1.0, 1.0, 0.0)),
    Placement::new(0.0, DVec3::new(-1.0, -1.0, 0.0)),
];

fn place(copy: &VisualObject, square: &VisualObject, placement: Placement) -> VisualObject {
    let mut placed = copy.clone();
    placed
        .rotate(placement.rotation)
        .align_to(square.corner(placement.corner), placement.corner);
    placed
}

/// A filled square of side `side` pushed into `corner` of `frame`, with its
/// area written in the middle.
fn area_square(
    ctx: &mut SceneContext,
    frame: &VisualObject,
    side: f64,
    corner: DVec3,
    area: &str,
) -> SideSquare {
    let mut figure = VisualObject::square(side)
        .with_style(Style::stroked(SQUARE_FILL).filled(SQUARE_FILL, FILL_OPACITY));
    figure.align_to(frame.corner(corner), corner);
    let mut label = VisualObject::text(area, LABEL_FONT);
    label.move_to(figure.center());
    SideSquare {
        figure: ctx.insert(figure),
        label: ctx.insert(label),
    }
}

/// The rearrangement proof: four copies of the triangle inside a square of
/// side `a + b` leave a hole of area `c^2`, and rearranged they leave `a^2`
/// and `b^2`.
#[derive(Debug, Clone, Copy)]
pub struct PythagoreanTheoremProofScene;

impl Scene for PythagoreanTheoremProofScene {
    fn name(&self) -> &str {
        "PythagoreanTheoremProofScene"
    }

    fn construct(&self, ctx: &mut SceneContext) -> Result<(), SceneError> {
        let (figure, labels) = labelled_triangle();
        let copies: Vec<VisualObject> = COPY_FILLS
            .iter()
            .map(|&fill| {
                figure
                    .clone()
                    .with_style(Style::stroked(Color::WHITE).filled(fill, FILL_OPACITY))
            })
            .collect();
        let square = VisualObject::square(BASE + HEIGHT);

        let triangle = ctx.insert(figure);
        let labels = labels.map(|label| ctx.insert(label));
        let mut animations = vec![Animation::Create { target: triangle }];
        animations.extend(labels.iter().map(|&target| Animation::Write { target }));
        ctx.play(animations);
        ctx.wait();

        let copy_ids: Vec<ObjectId> = copies.iter().map(|copy| ctx.insert(copy.clone())).collect();
        ctx.play(
            copy_ids
                .iter()
                .map(|&target| Animation::Create { target })
                .collect(),
        );
        ctx.wait();

        // Triangles into the corners; the original becomes the frame.
        let around_hypotenuse: Vec<VisualObject> = copies
            .iter()
            .zip(AROUND_HYPOTENUSE)
            .map(|(copy, placement)| place(copy, &square, placement))
            .collect();
        let around_legs: Vec<VisualObject> = copies
            .iter()
            .zip(AROUND_LEGS)
            .map(|(copy, placement)| place(copy, &square, placement))
            .collect();

        let frame = ctx.insert(square.clone());
        let mut animations = vec![Animation::Transform {
            target: triangle,
            into: frame,
        }];
        let first: Vec<ObjectId> = around_hypotenuse
            .into_iter()
            .map(|placed| ctx.insert(placed))
            .collect();
        animations.extend(
            copy_ids
                .iter()
                .zip(&first)
                .map(|(&target, &into)| Animation::Transform { target, into }),
        );
        ctx.play_for(animations, 2.0);

        let mut hole = VisualObject::square(HYPOTENUSE)
            .with_style(Style::stroked(SQUARE_FILL).filled(SQUARE_FILL, FILL_OPACITY));
        hole.rotate((HEIGHT / BASE).atan()).move_to(square.center());
        let mut hole_area = VisualObject::text("c²", LABEL_FONT);
        hole_area.move_to(square.center());
        let hole = ctx.insert(hole);
        let hole_area = ctx.insert(hole_area);
        ctx.play(vec![
            Animation::Create { target: hole },
            Animation::Write { target: hole_area },
        ]);
        ctx.wait();

        // Rearranged around the legs.
        let second: Vec<ObjectId> = around_legs
            .into_iter()
            .map(|placed| ctx.insert(placed))
            .collect();
        let mut animations: Vec<Animation> = first
            .iter()
            .zip(&second)
            .map(|(&target, &into)| Animation::Transform { target, into })
            .collect();
        animations.push(Animation::FadeOut { target: hole });
        animations.push(Animation::FadeOut { target: hole_area });
        ctx.play_for(animations, 2.0);

        let leg_squares = [
            area_square(ctx, &square, BASE, UP + LEFT, "a²"),
            area_square(ctx, &square, HEIGHT, DOWN + RIGHT, "b²"),
        ];
        let mut animations: Vec<Animation> = leg_squares
            .iter()
            .map(|s| Animation::Create { target: s.figure })
            .collect();
        animations.extend(
            leg_squares
                .iter()
                .map(|s| Animation::Write { target: s.label }),
        );
        ctx.play(animations);
        ctx.wait();

        let mut conclusion = VisualObject::text("c² = a² + b²", 0.8 * LABEL_FONT);
        conclusion.to_edge(DOWN, BUFF);
        let conclusion = ctx.insert(conclusion);
        ctx.play(vec![Animation::Write { target: conclusion }]);
        ctx.wait_for(2.0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use anim_object::Shape;
    use anim_scene::{RecordingRenderer, ScenePlan, SceneRunner, Step};

    use super::*;
    use crate::scenes::test_config;

    #[test]
    fn test_statement_read_from_file() {
        let plan = ScenePlan::build(&PythagoreanTheoremScene, &test_config()).unwrap();
        let statement = plan
            .store()
            .iter()
            .find_map(|o| match &o.shape {
                Shape::Text { content, .. } => Some(content.clone()),
                _ => None,
            })
            .unwrap();
        assert!(statement.starts_with("Given a right angle triangle"));
    }

    #[test]
    fn test_french_statement() {
        let config = test_config().with_language("fr");
        let plan = ScenePlan::build(&PythagoreanTheoremScene, &config).unwrap();
        assert!(plan.store().iter().any(|o| matches!(&o.shape,
            Shape::Text { content, .. } if content.starts_with("Dans un triangle rectangle"))));
    }

    #[test]
    fn test_missing_language_aborts() {
        let config = test_config().with_language("xx");
        let err = ScenePlan::build(&PythagoreanTheoremScene, &config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "theorem statement not found in language - xx"
        );
    }

    #[test]
    fn test_equation_moves_to_corner() {
        let mut plan = ScenePlan::build(&PythagoreanTheoremScene, &test_config()).unwrap();
        let mut runner = SceneRunner::new(RecordingRenderer::new(), test_config());
        runner.play(&mut plan).unwrap();
        let first_term = plan
            .store()
            .iter()
            .find(|o| matches!(&o.shape, Shape::Tex { source, .. } if source == "a^2"))
            .unwrap();
        assert!((first_term.center() - EQUATION_CORNER).length() < 1e-9);
    }

    #[test]
    fn test_three_indications() {
        let plan = ScenePlan::build(&PythagoreanTheoremScene, &test_config()).unwrap();
        let indications = plan
            .script()
            .steps()
            .iter()
            .filter(|s| matches!(s, Step::Play { animations, run_time }
                if *run_time == 2.0 && animations.len() == 3))
            .count();
        assert_eq!(indications, 3);
    }

    fn near(a: DVec3, b: DVec3) -> bool {
        (a - b).length() < 1e-9
    }

    fn has_vertex(object: &VisualObject, point: DVec3) -> bool {
        object.points.iter().any(|&p| near(p, point))
    }

    #[test]
    fn test_right_angles_in_square_corners() {
        let (figure, _) = labelled_triangle();
        let square = VisualObject::square(BASE + HEIGHT);
        for placement in AROUND_HYPOTENUSE {
            let placed = place(&figure, &square, placement);
            assert!(has_vertex(&placed, square.corner(placement.corner)));
            let (min, max) = placed.bounds().unwrap();
            let (lo, hi) = square.bounds().unwrap();
            assert!(min.x >= lo.x - 1e-9 && min.y >= lo.y - 1e-9);
            assert!(max.x <= hi.x + 1e-9 && max.y <= hi.y + 1e-9);
        }
    }

    #[test]
    fn test_rearranged_triangles_tile_two_rectangles() {
        let (figure, _) = labelled_triangle();
        let square = VisualObject::square(BASE + HEIGHT);
        let half = 0.5 * (BASE + HEIGHT);
        let placed: Vec<VisualObject> = AROUND_LEGS
            .iter()
            .map(|&placement| place(&figure, &square, placement))
            .collect();

        // Top right: HEIGHT wide, BASE tall. Bottom left: BASE wide, HEIGHT tall.
        let rectangles = [
            ([0, 2], DVec3::new(half - HEIGHT, half - BASE, 0.0), DVec3::new(half, half, 0.0)),
            ([1, 3], DVec3::new(-half, -half, 0.0), DVec3::new(-half + BASE, -half + HEIGHT, 0.0)),
        ];
        for (pair, min, max) in rectangles {
            for i in pair {
                let (lo, hi) = placed[i].bounds().unwrap();
                assert!(near(lo, min) && near(hi, max), "triangle {i} out of place");
            }
            let corners = [min, DVec3::new(max.x, min.y, 0.0), DVec3::new(min.x, max.y, 0.0), max];
            for corner in corners {
                assert!(pair.iter().any(|&i| has_vertex(&placed[i], corner)));
            }
        }
    }

    #[test]
    fn test_proof_ends_with_frame_and_leg_squares() {
        let mut plan = ScenePlan::build(&PythagoreanTheoremProofScene, &test_config()).unwrap();
        let transforms = plan
            .script()
            .steps()
            .iter()
            .filter_map(|s| match s {
                Step::Play { animations, .. } => Some(animations),
                _ => None,
            })
            .flatten()
            .filter(|a| matches!(a, Animation::Transform { .. }))
            .count();
        assert_eq!(transforms, 9);

        let mut runner = SceneRunner::new(RecordingRenderer::new(), test_config());
        let summary = runner.play(&mut plan).unwrap();
        let shown: Vec<&VisualObject> = summary
            .on_screen
            .iter()
            .map(|&id| plan.store().try_get(id).unwrap())
            .collect();
        let filled_triangles = shown
            .iter()
            .filter(|o| o.points.len() == 3 && o.style.fill.is_some())
            .count();
        assert_eq!(filled_triangles, 4);
        let areas: Vec<&str> = shown
            .iter()
            .filter_map(|o| match &o.shape {
                Shape::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(areas, ["a²", "b²", "c² = a² + b²"]);
    }
}
