//! Coordinate-space error types.

use anim_object::ObjectError;

/// Errors raised by [`VectorSpace`](crate::VectorSpace) and friends.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SpaceError {
    /// Axis identifier other than `x` or `y`.
    #[error("axis value can only be either x | y, got {0:?}")]
    InvalidAxis(String),

    /// Coordinates that are neither one pair nor a row-major batch of pairs.
    #[error("coordinates must have shape [2] or [n, 2], got {0:?}")]
    Shape(Vec<usize>),

    /// A transform target is missing from the object store.
    #[error(transparent)]
    Object(#[from] ObjectError),
}
