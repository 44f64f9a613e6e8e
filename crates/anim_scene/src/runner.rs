//! Scene playback.
//!
//! Playback is two-phase: [`ScenePlan::build`] runs the scene's `construct`
//! to produce objects and a script, then [`SceneRunner::play`] walks the
//! script one step at a time. A step is finished, and its pending
//! transforms executed, before the next step starts.

use anim_object::{ObjectId, ObjectStore, VisualObject};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::renderer::Renderer;
use crate::script::{Scene, SceneContext, SceneScript};
use crate::step::{Animation, Step};

/// A constructed scene, ready to play.
#[derive(Debug, Clone)]
pub struct ScenePlan {
    name: String,
    store: ObjectStore,
    script: SceneScript,
}

#[derive(Serialize)]
struct PlanView<'a> {
    scene: &'a str,
    duration: f64,
    objects: Vec<&'a VisualObject>,
    steps: &'a [Step],
}

impl ScenePlan {
    /// Run `scene.construct` against a fresh context.
    ///
    /// # Errors
    ///
    /// Returns whatever `construct` returns.
    pub fn build(scene: &dyn Scene, config: &SceneConfig) -> Result<Self, SceneError> {
        let mut ctx = SceneContext::new(config.clone());
        scene.construct(&mut ctx)?;
        let (store, script) = ctx.into_parts();
        debug!(
            scene = scene.name(),
            objects = store.len(),
            steps = script.len(),
            "scene constructed"
        );
        Ok(Self {
            name: scene.name().to_string(),
            store,
            script,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn store(&self) -> &ObjectStore {
        &self.store
    }

    #[must_use]
    pub fn script(&self) -> &SceneScript {
        &self.script
    }

    /// The plan as pretty JSON: scene name, objects, steps.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Encode`] if serialisation fails.
    pub fn to_json(&self) -> Result<String, SceneError> {
        let view = PlanView {
            scene: &self.name,
            duration: self.script.duration(),
            objects: self.store.iter().collect(),
            steps: self.script.steps(),
        };
        Ok(serde_json::to_string_pretty(&view)?)
    }
}

/// Result of playing one scene.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub steps: usize,
    /// Scene time in seconds.
    pub duration: f64,
    /// Objects left on screen, in the order they appeared.
    pub on_screen: Vec<ObjectId>,
}

/// Plays scenes against a [`Renderer`].
#[derive(Debug)]
pub struct SceneRunner<R> {
    renderer: R,
    config: SceneConfig,
}

impl<R: Renderer> SceneRunner<R> {
    #[must_use]
    pub fn new(renderer: R, config: SceneConfig) -> Self {
        Self { renderer, config }
    }

    #[must_use]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Construct and play `scene`.
    ///
    /// # Errors
    ///
    /// Returns the first error from construction, the renderer, or a
    /// step referring to an unknown object.
    pub fn run(&mut self, scene: &dyn Scene) -> Result<RunSummary, SceneError> {
        let mut plan = ScenePlan::build(scene, &self.config)?;
        self.play(&mut plan)
    }

    /// Play every step of `plan` in order. Pending transforms are executed
    /// on the plan's store as their step completes.
    ///
    /// # Errors
    ///
    /// Returns the first renderer error or unknown object. Playback stops
    /// at that step.
    pub fn play(&mut self, plan: &mut ScenePlan) -> Result<RunSummary, SceneError> {
        let ScenePlan {
            name,
            store,
            script,
        } = plan;
        let name = name.as_str();

        info!(scene = name, steps = script.len(), "playing scene");
        self.renderer.begin(name)?;

        let mut on_screen: Vec<ObjectId> = Vec::new();
        let mut elapsed = 0.0;
        for (index, step) in script.steps().iter().enumerate() {
            debug!(scene = name, step = index, kind = step.kind(), "step");
            match step {
                Step::Add { targets } => {
                    for &id in targets {
                        store.try_get(id)?;
                    }
                    self.renderer.add(store, targets)?;
                    for &id in targets {
                        show(&mut on_screen, id);
                    }
                }
                Step::Remove { targets } => {
                    for &id in targets {
                        store.try_get(id)?;
                    }
                    self.renderer.remove(targets)?;
                    on_screen.retain(|id| !targets.contains(id));
                }
                Step::Play {
                    animations,
                    run_time,
                } => {
                    self.play_animations(store, &mut on_screen, animations, *run_time)?;
                }
                Step::Wait { seconds } => self.renderer.wait(*seconds)?,
                Step::Clear { run_time } => {
                    let fades: Vec<Animation> = on_screen
                        .iter()
                        .map(|&target| Animation::FadeOut { target })
                        .collect();
                    self.play_animations(store, &mut on_screen, &fades, *run_time)?;
                }
            }
            elapsed += step.duration();
        }

        self.renderer.finish(name)?;
        info!(scene = name, duration = elapsed, "scene complete");

        Ok(RunSummary {
            steps: script.len(),
            duration: elapsed,
            on_screen,
        })
    }

    fn play_animations(
        &mut self,
        store: &mut ObjectStore,
        on_screen: &mut Vec<ObjectId>,
        animations: &[Animation],
        run_time: f64,
    ) -> Result<(), SceneError> {
        if animations.is_empty() {
            return Ok(());
        }
        for animation in animations {
            store.try_get(animation.target())?;
            if let Some(into) = animation.replacement() {
                store.try_get(into)?;
            }
        }
        self.renderer.play(store, animations, run_time)?;

        for animation in animations {
            match animation {
                Animation::ApplyPointwise { transform } => transform.apply(store)?,
                Animation::MoveTo { target, point } => {
                    store.try_get_mut(*target)?.move_to(*point);
                }
                _ => {}
            }
            let target = animation.target();
            if animation.shows_target() {
                show(on_screen, target);
            } else {
                on_screen.retain(|&id| id != target);
            }
            if let Some(into) = animation.replacement() {
                show(on_screen, into);
            }
        }
        Ok(())
    }
}

fn show(on_screen: &mut Vec<ObjectId>, id: ObjectId) {
    if !on_screen.contains(&id) {
        on_screen.push(id);
    }
}

#[cfg(test)]
mod tests {
    use anim_math::{AffineMap, PendingTransform};
    use anim_object::{Shape, VisualObject};
    use glam::DVec3;

    use super::*;
    use crate::renderer::{RecordingRenderer, RenderEvent};

    struct Shear;

    impl Scene for Shear {
        fn name(&self) -> &str {
            "shear"
        }

        fn construct(&self, ctx: &mut SceneContext) -> Result<(), SceneError> {
            let arrow = ctx.insert(VisualObject::arrow(DVec3::ZERO, DVec3::new(0.0, 1.0, 0.0)));
            let label = ctx.insert(VisualObject::text("v", 48.0));
            ctx.play(vec![Animation::GrowArrow { target: arrow }]);
            ctx.add([label]);
            ctx.play(vec![Animation::ApplyPointwise {
                transform: PendingTransform {
                    target: arrow,
                    map: AffineMap::about(DVec3::ZERO, [[1.0, 0.0], [1.0, 1.0]]),
                },
            }]);
            ctx.wait();
            Ok(())
        }
    }

    struct Broken;

    impl Scene for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn construct(&self, ctx: &mut SceneContext) -> Result<(), SceneError> {
            ctx.play(vec![Animation::FadeIn {
                target: ObjectId::from_raw(42),
            }]);
            Ok(())
        }
    }

    #[test]
    fn test_run_executes_pending_transforms() {
        let mut runner = SceneRunner::new(RecordingRenderer::new(), SceneConfig::default());
        let mut plan = ScenePlan::build(&Shear, runner.config()).unwrap();
        let summary = runner.play(&mut plan).unwrap();

        assert_eq!(summary.steps, 4);
        assert_eq!(summary.duration, 3.0);
        assert_eq!(summary.on_screen.len(), 2);

        // Row vector (0, 1) through [[1, 0], [1, 1]] lands on (1, 1).
        let arrow = plan
            .store()
            .iter()
            .find(|o| matches!(o.shape, Shape::Arrow { .. }))
            .unwrap();
        assert_eq!(arrow.points[1], DVec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_renderer_sees_steps_in_order() {
        let mut runner = SceneRunner::new(RecordingRenderer::new(), SceneConfig::default());
        runner.run(&Shear).unwrap();
        let events = runner.into_renderer().events;
        assert!(matches!(events.first(), Some(RenderEvent::Begin { .. })));
        assert!(matches!(events[1], RenderEvent::Play { .. }));
        assert!(matches!(events[2], RenderEvent::Add { .. }));
        assert!(matches!(events[4], RenderEvent::Wait { seconds } if seconds == 1.0));
        assert!(matches!(events.last(), Some(RenderEvent::Finish { .. })));
    }

    #[test]
    fn test_clear_fades_everything_on_screen() {
        struct Cleared;
        impl Scene for Cleared {
            fn name(&self) -> &str {
                "cleared"
            }
            fn construct(&self, ctx: &mut SceneContext) -> Result<(), SceneError> {
                let a = ctx.insert(VisualObject::text("a", 48.0));
                let b = ctx.insert(VisualObject::text("b", 48.0));
                ctx.add([a, b]);
                ctx.clear();
                Ok(())
            }
        }

        let mut runner = SceneRunner::new(RecordingRenderer::new(), SceneConfig::default());
        let summary = runner.run(&Cleared).unwrap();
        assert!(summary.on_screen.is_empty());
        let events = runner.into_renderer().events;
        match &events[2] {
            RenderEvent::Play { animations, .. } => {
                assert_eq!(animations.len(), 2);
                assert!(animations
                    .iter()
                    .all(|a| matches!(a, Animation::FadeOut { .. })));
            }
            other => panic!("expected fade out, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_target_aborts() {
        let mut runner = SceneRunner::new(RecordingRenderer::new(), SceneConfig::default());
        let err = runner.run(&Broken).unwrap_err();
        assert!(matches!(err, SceneError::Object(_)));
        // Nothing was played.
        let events = runner.into_renderer().events;
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_remove_of_unknown_object_aborts() {
        struct RemovesGhost;
        impl Scene for RemovesGhost {
            fn name(&self) -> &str {
                "removes_ghost"
            }
            fn construct(&self, ctx: &mut SceneContext) -> Result<(), SceneError> {
                ctx.remove([ObjectId::from_raw(42)]);
                Ok(())
            }
        }

        let mut runner = SceneRunner::new(RecordingRenderer::new(), SceneConfig::default());
        let err = runner.run(&RemovesGhost).unwrap_err();
        assert!(matches!(
            err,
            SceneError::Object(anim_object::ObjectError::Unknown(id)) if id == ObjectId::from_raw(42)
        ));
        let events = runner.into_renderer().events;
        assert!(!events.iter().any(|e| matches!(e, RenderEvent::Remove { .. })));
    }

    #[test]
    fn test_transform_swaps_objects_on_screen() {
        struct Morph;
        impl Scene for Morph {
            fn name(&self) -> &str {
                "morph"
            }
            fn construct(&self, ctx: &mut SceneContext) -> Result<(), SceneError> {
                let before = ctx.insert(VisualObject::text("4", 48.0));
                let after = ctx.insert(VisualObject::text("2.66", 48.0));
                ctx.add([before]);
                ctx.play(vec![Animation::Transform {
                    target: before,
                    into: after,
                }]);
                Ok(())
            }
        }

        let mut runner = SceneRunner::new(RecordingRenderer::new(), SceneConfig::default());
        let summary = runner.run(&Morph).unwrap();
        assert_eq!(summary.on_screen, vec![ObjectId::from_raw(2)]);
    }

    #[test]
    fn test_transform_into_unknown_object_aborts() {
        struct MorphIntoGhost;
        impl Scene for MorphIntoGhost {
            fn name(&self) -> &str {
                "morph_into_ghost"
            }
            fn construct(&self, ctx: &mut SceneContext) -> Result<(), SceneError> {
                let target = ctx.insert(VisualObject::text("4", 48.0));
                ctx.play(vec![Animation::Transform {
                    target,
                    into: ObjectId::from_raw(42),
                }]);
                Ok(())
            }
        }

        let mut runner = SceneRunner::new(RecordingRenderer::new(), SceneConfig::default());
        let err = runner.run(&MorphIntoGhost).unwrap_err();
        assert!(matches!(err, SceneError::Object(_)));
        let events = runner.into_renderer().events;
        assert!(!events.iter().any(|e| matches!(e, RenderEvent::Play { .. })));
    }

    #[test]
    fn test_plan_to_json() {
        let plan = ScenePlan::build(&Shear, &SceneConfig::default()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&plan.to_json().unwrap()).unwrap();
        assert_eq!(json["scene"], "shear");
        assert_eq!(json["objects"].as_array().unwrap().len(), 2);
        assert_eq!(json["steps"][0]["step"], "play");
        assert_eq!(json["duration"], 3.0);
    }
}
