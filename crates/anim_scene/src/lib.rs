//! # anim_scene
//!
//! Scenes for mathanim. A scene is a fixed script: [`Scene::construct`]
//! creates objects and queues [`Step`]s into a [`SceneContext`], then a
//! [`SceneRunner`] plays the queue strictly in order against a [`Renderer`].
//!
//! ## Lifecycle
//!
//! 1. Build a [`ScenePlan`] by running the scene's `construct`.
//! 2. Play it: each step finishes before the next starts. Pending transforms
//!    are executed on the object store at the step that carries them.
//! 3. The first error aborts the scene. Nothing is retried.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use anim_scene::{Scene, SceneConfig, SceneContext, SceneError, SceneRunner, TraceRenderer};
//!
//! struct Hello;
//!
//! impl Scene for Hello {
//!     fn name(&self) -> &str {
//!         "hello"
//!     }
//!
//!     fn construct(&self, ctx: &mut SceneContext) -> Result<(), SceneError> {
//!         let id = ctx.insert(anim_object::VisualObject::text("HI!!", 72.0));
//!         ctx.play(vec![anim_scene::Animation::FadeIn { target: id }]);
//!         ctx.clear();
//!         Ok(())
//!     }
//! }
//!
//! let mut runner = SceneRunner::new(TraceRenderer, SceneConfig::from_env());
//! runner.run(&Hello)?;
//! # Ok::<(), SceneError>(())
//! ```

pub mod config;
pub mod error;
pub mod geometry;
pub mod numerical;
pub mod renderer;
pub mod runner;
pub mod script;
pub mod statement;
pub mod step;

pub use config::SceneConfig;
pub use error::SceneError;
pub use geometry::{GeometrySetup, MatrixGeometry};
pub use numerical::MatrixDrawing;
pub use renderer::{RecordingRenderer, RenderEvent, Renderer, TraceRenderer};
pub use runner::{RunSummary, ScenePlan, SceneRunner};
pub use script::{Scene, SceneContext, SceneScript};
pub use statement::{StatementError, parse_statement, read_statement};
pub use step::{Animation, Step};
