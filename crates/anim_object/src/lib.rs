//! # anim_object
//!
//! The things a scene puts on screen. Objects here are plain descriptors: a
//! shape, a style and the control points the renderer draws from. Geometry
//! changes (shifts, linear transforms) act on those points; typesetting and
//! rasterisation belong to the renderer.
//!
//! This crate provides:
//!
//! - [`VisualObject`], [`Shape`], [`Style`], [`Color`]: object descriptors.
//! - [`ObjectStore`]: the per-scene registry of every created object, which
//!   hands out [`ObjectId`]s.

pub mod object;
pub mod store;

pub use object::{Color, Highlight, Shape, Style, VisualObject};
pub use store::{ObjectError, ObjectId, ObjectStore};

// Direction constants in scene units, matching the engine's screen axes.
pub use object::{DOWN, FRAME_HALF, LEFT, ORIGIN, RIGHT, UP};
