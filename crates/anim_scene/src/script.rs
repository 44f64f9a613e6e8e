//! Scene construction: the [`Scene`] trait and the context it scripts into.

use anim_object::{ObjectId, ObjectStore, VisualObject};
use serde::Serialize;

use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::statement::read_statement;
use crate::step::{Animation, Step};

/// The ordered steps of one scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SceneScript {
    steps: Vec<Step>,
}

impl SceneScript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Total scene time in seconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.steps.iter().map(Step::duration).sum()
    }
}

/// A fixed animation script.
pub trait Scene {
    fn name(&self) -> &str;

    /// Create objects and queue steps. Called once per run.
    ///
    /// # Errors
    ///
    /// Any error aborts the scene before anything is played.
    fn construct(&self, ctx: &mut SceneContext) -> Result<(), SceneError>;
}

/// What a scene's `construct` writes into: the objects it created and the
/// steps that show them.
#[derive(Debug, Clone)]
pub struct SceneContext {
    store: ObjectStore,
    script: SceneScript,
    config: SceneConfig,
}

impl SceneContext {
    #[must_use]
    pub fn new(config: SceneConfig) -> Self {
        Self {
            store: ObjectStore::new(),
            script: SceneScript::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &ObjectStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ObjectStore {
        &mut self.store
    }

    #[must_use]
    pub fn script(&self) -> &SceneScript {
        &self.script
    }

    /// Register an object without showing it.
    pub fn insert(&mut self, object: VisualObject) -> ObjectId {
        self.store.insert(object)
    }

    /// # Errors
    ///
    /// Returns [`SceneError::Object`] for an unknown id.
    pub fn object(&self, id: ObjectId) -> Result<&VisualObject, SceneError> {
        Ok(self.store.try_get(id)?)
    }

    /// # Errors
    ///
    /// Returns [`SceneError::Object`] for an unknown id.
    pub fn object_mut(&mut self, id: ObjectId) -> Result<&mut VisualObject, SceneError> {
        Ok(self.store.try_get_mut(id)?)
    }

    pub fn add(&mut self, targets: impl IntoIterator<Item = ObjectId>) {
        self.script.push(Step::Add {
            targets: targets.into_iter().collect(),
        });
    }

    pub fn remove(&mut self, targets: impl IntoIterator<Item = ObjectId>) {
        self.script.push(Step::Remove {
            targets: targets.into_iter().collect(),
        });
    }

    /// Play `animations` together for the default run time.
    pub fn play(&mut self, animations: Vec<Animation>) {
        let run_time = self.config.default_run_time;
        self.play_for(animations, run_time);
    }

    pub fn play_for(&mut self, animations: Vec<Animation>, run_time: f64) {
        if animations.is_empty() {
            return;
        }
        self.script.push(Step::Play {
            animations,
            run_time,
        });
    }

    pub fn wait(&mut self) {
        let seconds = self.config.default_wait;
        self.wait_for(seconds);
    }

    pub fn wait_for(&mut self, seconds: f64) {
        self.script.push(Step::Wait { seconds });
    }

    /// Fade out everything on screen.
    pub fn clear(&mut self) {
        let run_time = self.config.default_run_time;
        self.script.push(Step::Clear { run_time });
    }

    /// The configured-language block of `filename` in the statement directory.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Statement`] if the file is unreadable or has no
    /// block for the language.
    pub fn statement(&self, filename: &str) -> Result<String, SceneError> {
        Ok(read_statement(
            &self.config.statements_dir,
            filename,
            &self.config.language,
        )?)
    }

    #[must_use]
    pub fn into_parts(self) -> (ObjectStore, SceneScript) {
        (self.store, self.script)
    }
}
