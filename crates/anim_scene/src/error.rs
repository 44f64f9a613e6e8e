//! Scene-level error types.

use anim_math::SpaceError;
use anim_object::ObjectError;
use anim_tex::TexError;

use crate::statement::StatementError;

/// Anything that aborts a scene.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error(transparent)]
    Tex(#[from] TexError),

    #[error(transparent)]
    Space(#[from] SpaceError),

    #[error(transparent)]
    Object(#[from] ObjectError),

    #[error(transparent)]
    Statement(#[from] StatementError),

    /// The renderer rejected a step.
    #[error("renderer error: {0}")]
    Render(String),

    /// A plan could not be exported.
    #[error("failed to encode scene plan: {0}")]
    Encode(#[from] serde_json::Error),
}
