//! Fast calculations: the Leibniz series summed term by term until it
//! closes in on pi.

use anim_math::DVec3;
use anim_object::{Color, DOWN, ObjectId, RIGHT, UP, VisualObject};
use anim_scene::{Animation, Scene, SceneContext, SceneError};
use anim_tex::{Cell, leibniz_series_parts};

const TITLE_FONT: f64 = 48.0;
const BODY_FONT: f64 = 40.0;
const BUFF: f64 = 0.25;

const ARCTAN: &str = r"\arctan{x} = x - \frac{x^3}{3} + \frac{x^5}{5} - \frac{x^7}{7} + \frac{x^9}{9} - \frac{x^{11}}{11} + \dots";

/// Terms written out before the trailing dots.
const SHOWN_TERMS: usize = 5;
const ITERATIONS: usize = 40;
const VALUE_POSITION: DVec3 = DVec3::new(0.0, -0.5, 0.0);

/// `4, 4 - 4/3, 4 - 4/3 + 4/5, ...`: the first `iterations + 1` partial sums
/// of `4 · Σ (-1)^k / (2k + 1)`.
fn partial_sums(iterations: usize) -> Vec<f64> {
    let mut pi = 4.0;
    let mut sums = Vec::with_capacity(iterations + 1);
    sums.push(pi);
    for i in 1..=iterations {
        let sign = if i % 2 == 1 { -1.0 } else { 1.0 };
        pi += sign * 4.0 / (2 * i + 1) as f64;
        sums.push(pi);
    }
    sums
}

fn value(ctx: &mut SceneContext, pi: Cell) -> ObjectId {
    let mut tex = VisualObject::tex(format!(r"\pi = {pi}"), BODY_FONT, Vec::new());
    tex.move_to(VALUE_POSITION);
    ctx.insert(tex)
}

#[derive(Debug, Clone, Copy)]
pub struct FastCalculationsScene;

impl Scene for FastCalculationsScene {
    fn name(&self) -> &str {
        "FastCalculationsScene"
    }

    fn construct(&self, ctx: &mut SceneContext) -> Result<(), SceneError> {
        let mut title = VisualObject::text("Leibniz Series", TITLE_FONT).with_color(Color::YELLOW);
        title.to_edge(UP, BUFF);
        let mut formula = VisualObject::tex(ARCTAN, BODY_FONT, Vec::new());
        formula.next_to(&title, DOWN, BUFF);

        // One object per term, laid left to right and centred under the formula.
        let mut series: Vec<VisualObject> = Vec::new();
        for part in leibniz_series_parts(SHOWN_TERMS) {
            let mut object = part.to_object(BODY_FONT);
            match series.last() {
                Some(previous) => object.next_to(previous, RIGHT, BUFF),
                None => object.next_to(&formula, DOWN, BUFF),
            };
            series.push(object);
        }
        if let (Some(first), Some(last)) = (series.first(), series.last()) {
            let offset = formula.center().x - (first.center().x + last.center().x) / 2.0;
            for object in &mut series {
                object.shift(DVec3::new(offset, 0.0, 0.0));
            }
        }

        let title = ctx.insert(title);
        let formula = ctx.insert(formula);
        ctx.play_for(
            vec![
                Animation::Write { target: title },
                Animation::Write { target: formula },
            ],
            5.0,
        );
        ctx.wait();

        let series: Vec<_> = series.into_iter().map(|object| ctx.insert(object)).collect();
        ctx.play_for(
            series
                .iter()
                .map(|&target| Animation::Write { target })
                .collect(),
            5.0,
        );
        ctx.wait();

        let sums = partial_sums(ITERATIONS);
        let mut current = value(ctx, Cell::Integer(4));
        ctx.play(vec![Animation::Write { target: current }]);
        ctx.wait();

        let tail = series.last().copied();
        for (i, &pi) in sums.iter().enumerate().skip(1) {
            let term = if i <= SHOWN_TERMS { series.get(i).copied() } else { tail };
            let next = value(ctx, Cell::Number(pi));
            let mut animations: Vec<Animation> = term
                .map(|target| Animation::Indicate { target })
                .into_iter()
                .collect();
            animations.push(Animation::Transform {
                target: current,
                into: next,
            });
            ctx.play_for(animations, 0.3);
            current = next;
        }

        ctx.clear();
        ctx.wait_for(5.0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use anim_object::Shape;
    use anim_scene::{RecordingRenderer, ScenePlan, SceneRunner, Step};

    use super::*;
    use crate::scenes::test_config;

    fn tex_source(plan: &ScenePlan, id: ObjectId) -> String {
        match &plan.store().try_get(id).unwrap().shape {
            Shape::Tex { source, .. } => source.clone(),
            other => panic!("expected tex, got {other:?}"),
        }
    }

    #[test]
    fn test_partial_sums_close_in_on_pi() {
        let sums = partial_sums(ITERATIONS);
        assert_eq!(sums.len(), ITERATIONS + 1);
        assert_eq!(sums[0], 4.0);
        assert!((sums[1] - 8.0 / 3.0).abs() < 1e-12);
        // Alternating series: the error is below the first omitted term.
        let bound = 4.0 / (2 * ITERATIONS + 3) as f64;
        assert!((sums[ITERATIONS] - std::f64::consts::PI).abs() < bound);
    }

    #[test]
    fn test_value_updates_indicate_terms_then_tail() {
        let plan = ScenePlan::build(&FastCalculationsScene, &test_config()).unwrap();
        let updates: Vec<&Vec<Animation>> = plan
            .script()
            .steps()
            .iter()
            .filter_map(|s| match s {
                Step::Play { animations, run_time } if *run_time == 0.3 => Some(animations),
                _ => None,
            })
            .collect();
        assert_eq!(updates.len(), ITERATIONS);

        let indicated: Vec<_> = updates.iter().map(|a| a[0].target()).collect();
        let mut distinct = indicated[..SHOWN_TERMS].to_vec();
        distinct.dedup();
        assert_eq!(distinct.len(), SHOWN_TERMS);
        assert!(indicated[SHOWN_TERMS..].iter().all(|&id| id == indicated[SHOWN_TERMS]));
        assert_eq!(tex_source(&plan, indicated[SHOWN_TERMS]), r"+ \dots");
        assert_eq!(tex_source(&plan, indicated[0]), r"- \frac{1}{3}");
    }

    #[test]
    fn test_first_value_is_integer_then_floats() {
        let plan = ScenePlan::build(&FastCalculationsScene, &test_config()).unwrap();
        let values: Vec<String> = plan
            .store()
            .iter()
            .filter_map(|o| match &o.shape {
                Shape::Tex { source, .. } if source.starts_with(r"\pi = ") => Some(source.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(values.len(), ITERATIONS + 1);
        assert_eq!(values[0], r"\pi = 4");
        assert_eq!(values[1], r"\pi = 2.666666666666667");
    }

    #[test]
    fn test_screen_empty_at_end() {
        let mut runner = SceneRunner::new(RecordingRenderer::new(), test_config());
        let summary = runner.run(&FastCalculationsScene).unwrap();
        assert!(summary.on_screen.is_empty());
    }
}
