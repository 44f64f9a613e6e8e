//! Arithmetic progression: `3 + 5 + 7 + 9 + 11` as a staircase of dots, and
//! the half-turned copy that turns it into five rows of `a_1 + a_n`.

use anim_math::{AffineMap, DVec3, PendingTransform};
use anim_object::{Color, DOWN, Highlight, ObjectId, RIGHT, Style, VisualObject};
use anim_scene::{Animation, Scene, SceneContext, SceneError};

const SERIES: [usize; 5] = [3, 5, 7, 9, 11];
const DOT_RADIUS: f64 = 0.08;
const BODY_FONT: f64 = 48.0;
const BUFF: f64 = 0.25;

const FIRST_COLUMN: f64 = -7.0;
const NUMBER_COLUMN: f64 = 4.0;
const TOP_ROW: f64 = 2.5;
/// Blue channel of the top row's yellow; each row down loses 40.
const TOP_ROW_BLUE: u32 = 160;

/// `p ↦ -p + (-1, 1)`: a half turn about `(-0.5, 0.5)`.
const HALF_TURN_CENTER: DVec3 = DVec3::new(-0.5, 0.5, 0.0);
const HALF_TURN: [[f64; 2]; 2] = [[-1.0, 0.0], [0.0, -1.0]];

fn dot(center: DVec3, color: Color) -> VisualObject {
    VisualObject::circle(center, DOT_RADIUS).with_style(Style::stroked(color).filled(color, 1.0))
}

fn row_color(row: usize) -> Color {
    Color::from_hex(0xFFFF00 | (TOP_ROW_BLUE - 40 * row as u32))
}

/// Typeset `source`, colouring the first occurrence of each part.
fn highlighted(source: &str, parts: &[(&str, Color)]) -> VisualObject {
    let highlights = parts
        .iter()
        .filter_map(|&(part, color)| {
            source.find(part).map(|start| Highlight {
                bytes: start..start + part.len(),
                color,
            })
        })
        .collect();
    VisualObject::tex(source, BODY_FONT, highlights)
}

#[derive(Debug, Clone, Copy)]
pub struct ArithmeticProgressionScene;

impl Scene for ArithmeticProgressionScene {
    fn name(&self) -> &str {
        "ArithmeticProgressionScene"
    }

    fn construct(&self, ctx: &mut SceneContext) -> Result<(), SceneError> {
        let mut dots: Vec<ObjectId> = Vec::new();
        let mut numbers: Vec<ObjectId> = Vec::new();
        for (row, &count) in SERIES.iter().enumerate() {
            let y = TOP_ROW - row as f64;
            let color = row_color(row);
            let row_dots: Vec<ObjectId> = (0..count)
                .map(|col| ctx.insert(dot(DVec3::new(FIRST_COLUMN + col as f64, y, 0.0), color)))
                .collect();
            let mut number = VisualObject::tex(count.to_string(), BODY_FONT, Vec::new());
            number.move_to(DVec3::new(NUMBER_COLUMN, y, 0.0));
            let number = ctx.insert(number);

            let mut animations: Vec<Animation> = row_dots
                .iter()
                .map(|&target| Animation::Create { target })
                .collect();
            animations.push(Animation::Write { target: number });
            ctx.play(animations);
            ctx.wait();
            dots.extend(row_dots);
            numbers.push(number);
        }
        ctx.wait_for(2.0);

        // The turned copy lands row i of the copy on row 4 - i.
        let mut copies = Vec::with_capacity(dots.len());
        for &id in &dots {
            let copy = ctx.object(id)?.clone();
            copies.push(ctx.insert(copy));
        }
        let diagonal = ctx.insert(
            VisualObject::line(DVec3::new(-5.0, 2.7, 0.0), DVec3::new(4.0, -1.7, 0.0))
                .with_color(Color::BLUE),
        );
        let mut animations = Animation::pointwise(copies.iter().map(|&target| PendingTransform {
            target,
            map: AffineMap::about(HALF_TURN_CENTER, HALF_TURN),
        }));
        animations.extend(numbers.iter().map(|&target| Animation::FadeOut { target }));
        animations.push(Animation::Create { target: diagonal });
        ctx.play(animations);
        ctx.wait();

        // Every row now holds a_1 + a_n dots, and there are n rows.
        let width = VisualObject::line(DVec3::new(-7.0, -2.0, 0.0), DVec3::new(6.0, -2.0, 0.0))
            .with_color(Color::RED);
        let height = VisualObject::line(DVec3::new(6.2, -1.5, 0.0), DVec3::new(6.2, 2.5, 0.0))
            .with_color(Color::RED);
        let mut width_sum = highlighted(
            r"a_1 + a_n = 3 + 11 = 14",
            &[
                ("a_1", Color::YELLOW),
                ("a_n", Color::YELLOW),
                ("3", Color::YELLOW),
                ("11", Color::YELLOW),
                ("14", Color::GREEN),
            ],
        );
        width_sum.next_to(&width, DOWN, 0.5 * BUFF);
        let mut rows = highlighted("n=5", &[("n", Color::BLUE), ("5", Color::GREEN)]);
        rows.next_to(&height, RIGHT, 0.2 * BUFF);

        let width = ctx.insert(width);
        let width_sum = ctx.insert(width_sum);
        ctx.play_for(
            vec![
                Animation::Create { target: width },
                Animation::Write { target: width_sum },
            ],
            3.0,
        );
        let height = ctx.insert(height);
        let rows = ctx.insert(rows);
        ctx.play_for(
            vec![
                Animation::Create { target: height },
                Animation::Write { target: rows },
            ],
            3.0,
        );
        ctx.wait();
        ctx.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use anim_object::Shape;
    use anim_scene::{RecordingRenderer, ScenePlan, SceneRunner};

    use super::*;
    use crate::scenes::test_config;

    #[test]
    fn test_turned_copy_completes_every_row() {
        let mut plan = ScenePlan::build(&ArithmeticProgressionScene, &test_config()).unwrap();
        let mut runner = SceneRunner::new(RecordingRenderer::new(), test_config());
        runner.play(&mut plan).unwrap();

        let total = SERIES[0] + SERIES[SERIES.len() - 1];
        for row in 0..SERIES.len() {
            let y = TOP_ROW - row as f64;
            let mut xs: Vec<f64> = plan
                .store()
                .iter()
                .filter(|o| matches!(o.shape, Shape::Circle { .. }))
                .map(|o| o.center())
                .filter(|c| (c.y - y).abs() < 1e-9)
                .map(|c| c.x)
                .collect();
            xs.sort_by(f64::total_cmp);
            assert_eq!(xs.len(), total, "row {row}");
            // Contiguous: no gap and no overlap between original and copy.
            assert!(xs.windows(2).all(|w| (w[1] - w[0] - 1.0).abs() < 1e-9));
        }
    }

    #[test]
    fn test_row_colors_fade_from_yellow() {
        assert_eq!(row_color(0), Color::from_hex(0xFFFFA0));
        assert_eq!(row_color(4), Color::from_hex(0xFFFF00));
    }

    #[test]
    fn test_sum_highlights() {
        let sum = highlighted(
            r"a_1 + a_n = 3 + 11 = 14",
            &[("a_n", Color::YELLOW), ("14", Color::GREEN), ("x", Color::RED)],
        );
        let Shape::Tex {
            source, highlights, ..
        } = &sum.shape
        else {
            panic!("expected tex");
        };
        let painted: Vec<&str> = highlights.iter().map(|h| &source[h.bytes.clone()]).collect();
        assert_eq!(painted, ["a_n", "14"]);
    }
}
