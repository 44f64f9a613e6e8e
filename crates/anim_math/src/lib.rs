//! # anim_math
//!
//! Coordinate-space math for mathanim. Re-exports [`glam`] for linear algebra
//! and defines:
//!
//! - [`AffineMap`] / [`PendingTransform`]: origin-relative linear maps and
//!   the deferred work of applying them to objects.
//! - [`NumberPlane`] / [`AxisRange`]: logical-to-screen coordinate mapping.
//! - [`VectorSpace`]: a plane plus the objects that move with it.

pub mod error;
pub mod plane;
pub mod space;
pub mod transform;

// Re-export glam types for convenience.
pub use glam::{DMat2, DMat3, DVec2, DVec3};

pub use error::SpaceError;
pub use plane::{Axis, AxisRange, NumberPlane};
pub use space::{ArrowStyle, CoordBatch, Mask, SpaceOptions, VectorSpace};
pub use transform::{AffineMap, LinearMatrix, PendingTransform};
