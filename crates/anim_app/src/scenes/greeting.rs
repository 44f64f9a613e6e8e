//! The series teaser: a flashed greeting before the first episode.

use anim_object::{Color, DOWN, UP, VisualObject};
use anim_scene::{Animation, Scene, SceneContext, SceneError};

const FONT: f64 = 72.0;
/// Vertical gap between stacked words.
const LINE_GAP: f64 = 1.0;

/// Series teaser.
#[derive(Debug, Clone, Copy)]
pub struct HiScene;

impl Scene for HiScene {
    fn name(&self) -> &str {
        "HiScene"
    }

    fn construct(&self, ctx: &mut SceneContext) -> Result<(), SceneError> {
        let hi = ctx.insert(VisualObject::text("HI!!", FONT).with_color(Color::YELLOW));
        ctx.play(vec![Animation::FadeIn { target: hi }]);
        ctx.play_for(vec![Animation::FadeOut { target: hi }], 0.2);

        let series = VisualObject::text("SERIES", FONT).with_color(Color::GREEN);
        let mut exciting = VisualObject::text("EXCITING", FONT).with_color(Color::RED);
        exciting.next_to(&series, UP, LINE_GAP);
        let mut coming = VisualObject::text("COMING UP!", FONT).with_color(Color::BLUE);
        coming.next_to(&series, DOWN, LINE_GAP);

        for object in [exciting, series, coming] {
            let id = ctx.insert(object);
            ctx.play(vec![Animation::FadeIn { target: id }]);
        }
        ctx.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use anim_scene::{RecordingRenderer, RenderEvent, SceneRunner};

    use super::*;
    use crate::scenes::test_config;

    #[test]
    fn test_clears_three_words() {
        let mut runner = SceneRunner::new(RecordingRenderer::new(), test_config());
        let summary = runner.run(&HiScene).unwrap();
        assert!(summary.on_screen.is_empty());

        let events = runner.into_renderer().events;
        let Some(RenderEvent::Play { animations, .. }) = events.iter().rev().nth(1) else {
            panic!("expected the clear to play");
        };
        assert_eq!(animations.len(), 3);
    }
}
