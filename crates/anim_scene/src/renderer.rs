//! The renderer seam.
//!
//! A [`Renderer`] turns played steps into frames. Rasterisation, TeX
//! typesetting and video encoding all live behind this trait. The crate
//! ships [`TraceRenderer`], which logs every step, and
//! [`RecordingRenderer`], which keeps them.

use anim_object::{ObjectId, ObjectStore};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::SceneError;
use crate::step::Animation;

/// Receives the steps of a scene in order.
///
/// `store` always holds the objects as they are at the *start* of the call;
/// the runner executes pending transforms after `play` returns.
pub trait Renderer {
    /// Called once before the first step.
    fn begin(&mut self, _scene: &str) -> Result<(), SceneError> {
        Ok(())
    }

    fn add(&mut self, store: &ObjectStore, targets: &[ObjectId]) -> Result<(), SceneError>;

    fn remove(&mut self, targets: &[ObjectId]) -> Result<(), SceneError>;

    fn play(
        &mut self,
        store: &ObjectStore,
        animations: &[Animation],
        run_time: f64,
    ) -> Result<(), SceneError>;

    fn wait(&mut self, seconds: f64) -> Result<(), SceneError>;

    /// Called once after the last step.
    fn finish(&mut self, _scene: &str) -> Result<(), SceneError> {
        Ok(())
    }
}

/// Logs every step through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TraceRenderer;

impl Renderer for TraceRenderer {
    fn begin(&mut self, scene: &str) -> Result<(), SceneError> {
        info!(scene, "render started");
        Ok(())
    }

    fn add(&mut self, store: &ObjectStore, targets: &[ObjectId]) -> Result<(), SceneError> {
        for &id in targets {
            let object = store.try_get(id)?;
            debug!(object = %id, shape = ?object.shape, "add");
        }
        Ok(())
    }

    fn remove(&mut self, targets: &[ObjectId]) -> Result<(), SceneError> {
        debug!(count = targets.len(), "remove");
        Ok(())
    }

    fn play(
        &mut self,
        _store: &ObjectStore,
        animations: &[Animation],
        run_time: f64,
    ) -> Result<(), SceneError> {
        debug!(animations = animations.len(), run_time, "play");
        Ok(())
    }

    fn wait(&mut self, seconds: f64) -> Result<(), SceneError> {
        debug!(seconds, "wait");
        Ok(())
    }

    fn finish(&mut self, scene: &str) -> Result<(), SceneError> {
        info!(scene, "render finished");
        Ok(())
    }
}

/// What a [`RecordingRenderer`] saw.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RenderEvent {
    Begin { scene: String },
    Add { targets: Vec<ObjectId> },
    Remove { targets: Vec<ObjectId> },
    Play {
        animations: Vec<Animation>,
        run_time: f64,
    },
    Wait { seconds: f64 },
    Finish { scene: String },
}

/// Keeps every call as a [`RenderEvent`].
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    pub events: Vec<RenderEvent>,
}

impl RecordingRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for RecordingRenderer {
    fn begin(&mut self, scene: &str) -> Result<(), SceneError> {
        self.events.push(RenderEvent::Begin {
            scene: scene.to_string(),
        });
        Ok(())
    }

    fn add(&mut self, _store: &ObjectStore, targets: &[ObjectId]) -> Result<(), SceneError> {
        self.events.push(RenderEvent::Add {
            targets: targets.to_vec(),
        });
        Ok(())
    }

    fn remove(&mut self, targets: &[ObjectId]) -> Result<(), SceneError> {
        self.events.push(RenderEvent::Remove {
            targets: targets.to_vec(),
        });
        Ok(())
    }

    fn play(
        &mut self,
        _store: &ObjectStore,
        animations: &[Animation],
        run_time: f64,
    ) -> Result<(), SceneError> {
        self.events.push(RenderEvent::Play {
            animations: animations.to_vec(),
            run_time,
        });
        Ok(())
    }

    fn wait(&mut self, seconds: f64) -> Result<(), SceneError> {
        self.events.push(RenderEvent::Wait { seconds });
        Ok(())
    }

    fn finish(&mut self, scene: &str) -> Result<(), SceneError> {
        self.events.push(RenderEvent::Finish {
            scene: scene.to_string(),
        });
        Ok(())
    }
}
